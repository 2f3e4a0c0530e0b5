use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Closed set of lookback windows. Granularity always divides the lookback
/// evenly, so the generated bucket sequence is dense and gap-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[value(name = "24h")]
    Last24h,
    #[value(name = "7d")]
    Last7d,
    #[value(name = "30d")]
    Last30d,
}

impl TimeRange {
    pub fn lookback(&self) -> Duration {
        match self {
            TimeRange::Last24h => Duration::hours(24),
            TimeRange::Last7d => Duration::days(7),
            TimeRange::Last30d => Duration::days(30),
        }
    }

    pub fn granularity(&self) -> Duration {
        match self {
            TimeRange::Last24h => Duration::hours(1),
            TimeRange::Last7d | TimeRange::Last30d => Duration::days(1),
        }
    }

    pub fn bucket_count(&self) -> usize {
        match self {
            TimeRange::Last24h => 24,
            TimeRange::Last7d => 7,
            TimeRange::Last30d => 30,
        }
    }

    pub fn hourly(&self) -> bool {
        matches!(self, TimeRange::Last24h)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Last24h => "24 hours",
            TimeRange::Last7d => "7 days",
            TimeRange::Last30d => "30 days",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuakeEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    pub place: String,
}

/// One aligned time slot. Counts are written only during aggregation and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub key: String,
    pub commit_count: u32,
    pub quake_count: u32,
}

impl SeriesPoint {
    pub fn empty(key: String) -> Self {
        Self {
            key,
            commit_count: 0,
            quake_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Commit,
    Quake,
}

/// Normalized entry of the merged, time-descending activity log. Derived per
/// cycle, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub kind: FeedKind,
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repo: String,
    pub range: TimeRange,
    pub synchronicity: u32,
    pub total_commits: usize,
    pub total_quakes: usize,
    pub average_magnitude: f64,
    pub chaos_ratio: f64,
    pub truncated: bool,
    pub series: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repo: String,
    pub range: TimeRange,
    pub items: Vec<FeedItem>,
}
