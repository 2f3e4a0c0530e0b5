use chrono::{DateTime, DurationRound, Utc};

use crate::model::TimeRange;

/// Truncates a timestamp to its bucket boundary: start of hour for the
/// hourly range, start of day otherwise. Idempotent.
pub fn truncate(timestamp: DateTime<Utc>, range: TimeRange) -> DateTime<Utc> {
    // Durations here are positive and sub-day, so rounding cannot fail.
    timestamp
        .duration_trunc(range.granularity())
        .unwrap_or(timestamp)
}

/// Canonical key text for one aligned time slot. An event and a bucket are
/// associated iff their truncated timestamps render the same key.
pub fn bucket_key(timestamp: DateTime<Utc>, range: TimeRange) -> String {
    let truncated = truncate(timestamp, range);
    if range.hourly() {
        truncated.format("%Y-%m-%d %H:%M").to_string()
    } else {
        truncated.format("%Y-%m-%d").to_string()
    }
}

/// Generates the dense bucket sequence spanning the lookback window up to
/// `now`. Exactly `range.bucket_count()` keys, chronologically ordered, the
/// last one being `truncate(now)` (the current partial slot is included).
pub fn generate_buckets(range: TimeRange, now: DateTime<Utc>) -> Vec<String> {
    let granularity = range.granularity();
    let mut cursor = truncate(now - range.lookback(), range);
    let mut keys = Vec::with_capacity(range.bucket_count());

    while keys.len() < range.bucket_count() {
        cursor += granularity;
        keys.push(bucket_key(cursor, range));
    }

    keys
}
