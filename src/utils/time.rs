use chrono::{DateTime, Duration, Utc};

/// Listings without an explicit expiry stay open this long.
pub const DEFAULT_LISTING_LIFETIME_DAYS: i64 = 30;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn default_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(DEFAULT_LISTING_LIFETIME_DAYS)
}

/// Whole days between `now` and `target`, rounded up.
pub fn days_between_ceil(now: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds().abs();
    let day = Duration::days(1).num_milliseconds();
    (millis + day - 1) / day
}

/// Relative label used by the dashboard activity feed.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 60 {
        format!("{}s ago", secs.max(0))
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}
