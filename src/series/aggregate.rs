use std::collections::HashMap;

use crate::model::{CommitEvent, QuakeEvent, SeriesPoint, TimeRange};

use super::bucket::bucket_key;

/// Assigns every raw event to its aligned slot and counts per bucket.
///
/// Events whose key is not in `buckets` (clock skew, upstream over-fetch)
/// are dropped from the series; the merged feed still carries them. The
/// output preserves the chronological order of `buckets`, which the
/// correlation pass depends on.
pub fn aggregate(
    buckets: &[String],
    commits: &[CommitEvent],
    quakes: &[QuakeEvent],
    range: TimeRange,
) -> Vec<SeriesPoint> {
    let mut counts: HashMap<&str, (u32, u32)> = buckets
        .iter()
        .map(|key| (key.as_str(), (0u32, 0u32)))
        .collect();

    for commit in commits {
        let key = bucket_key(commit.timestamp, range);
        if let Some(entry) = counts.get_mut(key.as_str()) {
            entry.0 += 1;
        }
    }

    for quake in quakes {
        let key = bucket_key(quake.timestamp, range);
        if let Some(entry) = counts.get_mut(key.as_str()) {
            entry.1 += 1;
        }
    }

    buckets
        .iter()
        .map(|key| {
            let (commit_count, quake_count) = counts[key.as_str()];
            SeriesPoint {
                key: key.clone(),
                commit_count,
                quake_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::bucket::generate_buckets;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()
    }

    fn commit_at(id: &str, ts: DateTime<Utc>) -> CommitEvent {
        CommitEvent {
            id: id.to_string(),
            timestamp: ts,
            message: format!("commit {id}"),
        }
    }

    fn quake_at(id: &str, ts: DateTime<Utc>) -> QuakeEvent {
        QuakeEvent {
            id: id.to_string(),
            timestamp: ts,
            magnitude: 3.0,
            place: "10km N of Somewhere".to_string(),
        }
    }

    #[test]
    fn counts_land_in_expected_hour_buckets() {
        let now = fixed_now();
        let range = TimeRange::Last24h;
        let buckets = generate_buckets(range, now);

        // Two commits in the current hour, one three hours back.
        let commits = vec![
            commit_at("a", now - Duration::minutes(5)),
            commit_at("b", now - Duration::minutes(10)),
            commit_at("c", now - Duration::hours(3)),
        ];
        // One quake five hours back.
        let quakes = vec![quake_at("q1", now - Duration::hours(5))];

        let series = aggregate(&buckets, &commits, &quakes, range);
        assert_eq!(series.len(), 24);

        let last = series.last().unwrap();
        assert_eq!(last.key, "2024-03-15 12:00");
        assert_eq!(last.commit_count, 2);
        assert_eq!(last.quake_count, 0);

        assert_eq!(series[20].key, "2024-03-15 09:00");
        assert_eq!(series[20].commit_count, 1);

        assert_eq!(series[18].key, "2024-03-15 07:00");
        assert_eq!(series[18].quake_count, 1);
    }

    #[test]
    fn out_of_window_events_are_dropped() {
        let now = fixed_now();
        let range = TimeRange::Last24h;
        let buckets = generate_buckets(range, now);

        let commits = vec![
            commit_at("in", now - Duration::hours(1)),
            commit_at("old", now - Duration::days(2)),
            commit_at("future", now + Duration::hours(2)),
        ];

        let series = aggregate(&buckets, &commits, &[], range);
        let total: u32 = series.iter().map(|p| p.commit_count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn series_sum_equals_in_window_event_count() {
        let now = fixed_now();
        let range = TimeRange::Last7d;
        let buckets = generate_buckets(range, now);

        let commits: Vec<_> = (0..20)
            .map(|i| commit_at(&format!("c{i}"), now - Duration::hours(i * 9)))
            .collect();

        let series = aggregate(&buckets, &commits, &[], range);
        let in_window = commits
            .iter()
            .filter(|c| buckets.contains(&bucket_key(c.timestamp, range)))
            .count();
        let total: u32 = series.iter().map(|p| p.commit_count).sum();
        assert_eq!(total as usize, in_window);
    }

    #[test]
    fn empty_inputs_yield_zeroed_series() {
        let range = TimeRange::Last7d;
        let buckets = generate_buckets(range, fixed_now());
        let series = aggregate(&buckets, &[], &[], range);
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.commit_count == 0 && p.quake_count == 0));
    }
}
