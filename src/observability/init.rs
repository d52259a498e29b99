//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and tracer name stamped on every span.
const SERVICE_NAME: &str = "mylibrary";

/// File the spans are written to, below the plugin data directory.
pub const TRACE_FILE_NAME: &str = "mylibrary-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] at `trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `<data_dir>/mylibrary-otlp.json`.
///
/// Does nothing when the data directory cannot be created. Calling it again
/// after a subscriber is installed has no effect.
pub fn init_tracing(config: &Config) {
    init_tracing_in(&crate::infrastructure::get_data_dir(), config);
}

pub(crate) fn init_tracing_in(data_dir: &Path, config: &Config) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            trace_level: Some("not a [valid filter".to_string()),
            ..Config::default()
        };

        init_tracing_in(dir.path(), &config);
        init_tracing_in(dir.path(), &config);
        tracing::info!("after init");
    }

    #[test]
    fn unusable_data_dir_is_skipped() {
        let file = tempfile::NamedTempFile::new().unwrap();
        init_tracing_in(&file.path().join("nested"), &Config::default());
    }
}
