use chrono::{DateTime, Utc};

use crate::fetch::{COMMIT_PAGE_SIZE, QUAKE_LIMIT};
use crate::feed::merge_feed;
use crate::model::{
    CommitEvent, FeedItem, FeedOutput, QuakeEvent, SeriesPoint, StatsOutput, TimeRange,
    SCHEMA_VERSION,
};
use crate::series::{aggregate, average_magnitude, chaos_ratio, generate_buckets, synchronicity};

/// Everything one successful fetch cycle produced. Built once, read-only
/// afterwards; the next successful cycle replaces it wholesale.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub repo: String,
    pub range: TimeRange,
    pub fetched_at: DateTime<Utc>,
    pub commits: Vec<CommitEvent>,
    pub quakes: Vec<QuakeEvent>,
    pub series: Vec<SeriesPoint>,
    pub synchronicity: u32,
    pub average_magnitude: f64,
    pub chaos_ratio: f64,
    pub feed: Vec<FeedItem>,
    /// Either upstream returned exactly its page cap, so more events likely
    /// exist than were fetched.
    pub truncated: bool,
}

impl Snapshot {
    pub fn compute(
        repo: String,
        range: TimeRange,
        now: DateTime<Utc>,
        commits: Vec<CommitEvent>,
        quakes: Vec<QuakeEvent>,
    ) -> Self {
        let buckets = generate_buckets(range, now);
        let series = aggregate(&buckets, &commits, &quakes, range);
        let truncated = commits.len() == COMMIT_PAGE_SIZE as usize
            || quakes.len() == QUAKE_LIMIT as usize;

        Self {
            synchronicity: synchronicity(&series),
            average_magnitude: average_magnitude(&quakes),
            chaos_ratio: chaos_ratio(commits.len(), quakes.len()),
            feed: merge_feed(&commits, &quakes),
            repo,
            range,
            fetched_at: now,
            commits,
            quakes,
            series,
            truncated,
        }
    }

    pub fn stats_output(&self) -> StatsOutput {
        StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: self.fetched_at,
            repo: self.repo.clone(),
            range: self.range,
            synchronicity: self.synchronicity,
            total_commits: self.commits.len(),
            total_quakes: self.quakes.len(),
            average_magnitude: self.average_magnitude,
            chaos_ratio: self.chaos_ratio,
            truncated: self.truncated,
            series: self.series.clone(),
        }
    }

    pub fn feed_output(&self) -> FeedOutput {
        FeedOutput {
            version: SCHEMA_VERSION,
            generated_at: self.fetched_at,
            repo: self.repo.clone(),
            range: self.range,
            items: self.feed.clone(),
        }
    }
}

/// Current inputs and last successful snapshot, owned by whichever frontend
/// is driving cycles. Carries the request-generation counter that makes
/// overlapping cycles last-request-wins instead of last-to-resolve-wins.
pub struct Dashboard {
    pub repo: String,
    pub range: TimeRange,
    pub snapshot: Option<Snapshot>,
    pub error: Option<String>,
    generation: u64,
}

impl Dashboard {
    pub fn new(repo: String, range: TimeRange) -> Self {
        Self {
            repo,
            range,
            snapshot: None,
            error: None,
            generation: 0,
        }
    }

    /// Starts a new cycle and returns its generation tag.
    pub fn begin_cycle(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Applies a completed cycle. A result from a superseded generation is
    /// discarded; a failure keeps the previous snapshot on screen and only
    /// records the message (stale-but-visible).
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<Snapshot, String>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()
    }

    fn snapshot_with(commits: usize, quakes: usize) -> Snapshot {
        let now = fixed_now();
        let commits = (0..commits)
            .map(|i| CommitEvent {
                id: format!("c{i}"),
                timestamp: now - Duration::hours(1),
                message: "work".to_string(),
            })
            .collect();
        let quakes = (0..quakes)
            .map(|i| QuakeEvent {
                id: format!("q{i}"),
                timestamp: now - Duration::hours(2),
                magnitude: 3.0,
                place: "somewhere".to_string(),
            })
            .collect();
        Snapshot::compute("a/b".to_string(), TimeRange::Last24h, now, commits, quakes)
    }

    #[test]
    fn snapshot_wires_series_and_metrics_together() {
        let snapshot = snapshot_with(10, 4);
        assert_eq!(snapshot.series.len(), 24);
        assert_eq!(snapshot.chaos_ratio, 2.5);
        assert_eq!(snapshot.average_magnitude, 3.0);
        assert_eq!(snapshot.feed.len(), 14);
        assert!(!snapshot.truncated);
    }

    #[test]
    fn page_cap_marks_snapshot_truncated() {
        assert!(snapshot_with(100, 0).truncated);
        assert!(snapshot_with(1, 200).truncated);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut dash = Dashboard::new("a/b".to_string(), TimeRange::Last24h);
        let first = dash.begin_cycle();
        let second = dash.begin_cycle();

        // The superseded cycle resolves late; its result must not land.
        assert!(!dash.apply(first, Ok(snapshot_with(1, 1))));
        assert!(dash.snapshot.is_none());

        assert!(dash.apply(second, Ok(snapshot_with(2, 2))));
        assert_eq!(dash.snapshot.as_ref().unwrap().commits.len(), 2);
    }

    #[test]
    fn failed_cycle_keeps_previous_snapshot() {
        let mut dash = Dashboard::new("a/b".to_string(), TimeRange::Last24h);
        let gen = dash.begin_cycle();
        dash.apply(gen, Ok(snapshot_with(3, 1)));

        let gen = dash.begin_cycle();
        dash.apply(gen, Err("GitHub API rate limit exceeded".to_string()));

        assert_eq!(dash.snapshot.as_ref().unwrap().commits.len(), 3);
        assert_eq!(
            dash.error.as_deref(),
            Some("GitHub API rate limit exceeded")
        );

        // Next success clears the message.
        let gen = dash.begin_cycle();
        dash.apply(gen, Ok(snapshot_with(5, 1)));
        assert!(dash.error.is_none());
    }
}
