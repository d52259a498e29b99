//! Relative "last updated" labels.
//!
//! Produces the fuzzy English phrases users expect next to a modification time
//! ("about an hour ago", "3 days ago"). The reference time is passed in so the
//! mapper stays deterministic.

use chrono::{DateTime, TimeZone, Utc};

const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: f64 = 60.0;
const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Formats the distance between `then` and `now` as a phrase.
///
/// Times in the future are treated as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use mylibrary::domain::timeago::time_ago;
///
/// let now = Utc::now();
/// assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
/// assert_eq!(time_ago(now - Duration::days(1), now), "a day ago");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0) as f64;
    let minutes = seconds / SECONDS_PER_MINUTE;
    let hours = minutes / MINUTES_PER_HOUR;
    let days = hours / HOURS_PER_DAY;
    let years = days / DAYS_PER_YEAR;

    if seconds < 45.0 {
        "less than a minute ago".to_string()
    } else if seconds < 90.0 {
        "about a minute ago".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes ago", minutes.round())
    } else if minutes < 90.0 {
        "about an hour ago".to_string()
    } else if hours < 24.0 {
        format!("about {} hours ago", hours.round())
    } else if hours < 42.0 {
        "a day ago".to_string()
    } else if days < 30.0 {
        format!("{} days ago", days.round())
    } else if days < 45.0 {
        "about a month ago".to_string()
    } else if days < 365.0 {
        format!("{} months ago", (days / DAYS_PER_MONTH).round())
    } else if years < 1.5 {
        "about a year ago".to_string()
    } else {
        format!("{} years ago", years.round())
    }
}

/// Formats an epoch-millisecond timestamp relative to `now`.
///
/// Returns an empty label when the timestamp is absent or out of range.
#[must_use]
pub fn time_ago_millis(millis: Option<i64>, now: DateTime<Utc>) -> String {
    millis
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|then| time_ago(then, now))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn phrases_by_distance() {
        let now = now();
        assert_eq!(time_ago(now - Duration::seconds(10), now), "less than a minute ago");
        assert_eq!(time_ago(now - Duration::seconds(60), now), "about a minute ago");
        assert_eq!(time_ago(now - Duration::minutes(70), now), "about an hour ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "about 3 hours ago");
        assert_eq!(time_ago(now - Duration::days(4), now), "4 days ago");
        assert_eq!(time_ago(now - Duration::days(90), now), "3 months ago");
        assert_eq!(time_ago(now - Duration::days(400), now), "about a year ago");
        assert_eq!(time_ago(now - Duration::days(1100), now), "3 years ago");
    }

    #[test]
    fn future_times_are_recent() {
        let now = now();
        assert_eq!(time_ago(now + Duration::hours(2), now), "less than a minute ago");
    }

    #[test]
    fn millis_conversion() {
        let now = now();
        let then = (now - Duration::minutes(10)).timestamp_millis();
        assert_eq!(time_ago_millis(Some(then), now), "10 minutes ago");
        assert_eq!(time_ago_millis(None, now), "");
    }
}
