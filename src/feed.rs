use crate::model::{CommitEvent, FeedItem, FeedKind, QuakeEvent};

/// Merges both raw collections into one time-descending activity log.
///
/// Unlike the bucketed series, the feed keeps events that fall outside the
/// active window, so over-fetched entries stay visible here.
pub fn merge_feed(commits: &[CommitEvent], quakes: &[QuakeEvent]) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = commits
        .iter()
        .map(|c| FeedItem {
            kind: FeedKind::Commit,
            id: c.id.clone(),
            timestamp: c.timestamp,
            description: first_line(&c.message),
        })
        .chain(quakes.iter().map(|q| FeedItem {
            kind: FeedKind::Quake,
            id: q.id.clone(),
            timestamp: q.timestamp,
            description: format!("{} (Mag {})", q.place, q.magnitude),
        }))
        .collect();

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or("").to_string()
}
