use chrono::{DateTime, Utc};

/// Compact count with K/M suffixes: 999 → "999", 1500 → "1.5K", 2300000 → "2.3M".
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// "Just now", "5 minutes ago", "1 hour ago", "3 days ago".
///
/// Future timestamps read as "Just now".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "Just now".to_string();
    }
    let (value, unit) = if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else {
        (secs / 86_400, "day")
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} ago")
}

/// Relative time for an RFC 3339 timestamp string, as the providers supply.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(then) => format_relative_time(then.with_timezone(&Utc), now),
        Err(_) => raw.to_string(),
    }
}

/// Icon shown next to a category name.
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "technology" => "💻",
        "sports" => "⚽",
        "finance" => "💰",
        "entertainment" => "🎬",
        "adventure" => "🗺️",
        "thriller" => "🎭",
        _ => "📰",
    }
}
