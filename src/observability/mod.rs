//! Tracing with OpenTelemetry spans exported to a local file.
//!
//! ```text
//! tracing macros → EnvFilter → tracing-opentelemetry → SDK provider → OTLP JSON file
//! ```
//!
//! Spans land in `~/.local/share/zellij/mylibrary/mylibrary-otlp.json`, one
//! `resourceSpans` document per line, rotated into `.1`, `.2`, `.3` backups.
//! The level comes from the `trace_level` plugin option and defaults to
//! `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: Size-rotated trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
