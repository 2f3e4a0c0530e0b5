use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{QuakeSyncError, Result};
use crate::model::CommitEvent;

pub const COMMIT_PAGE_SIZE: u32 = 100;

const SOURCE: &str = "GitHub";

// Wire shape of /repos/{owner}/{repo}/commits. Required fields only; a
// record missing any of them is a decode error, not a silent null.
#[derive(Debug, Deserialize)]
struct WireCommit {
    sha: String,
    commit: WireCommitBody,
}

#[derive(Debug, Deserialize)]
struct WireCommitBody {
    author: WireCommitAuthor,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireCommitAuthor {
    date: DateTime<Utc>,
}

pub fn commits_url(base: &str, repo: &str, since: DateTime<Utc>) -> String {
    // Z-suffixed form; a "+00:00" offset would read as a space in the query.
    format!(
        "{base}/repos/{repo}/commits?since={}&per_page={COMMIT_PAGE_SIZE}",
        since.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

/// Maps a non-2xx GitHub status into the fetch-cycle failure taxonomy.
pub fn status_error(status: u16, repo: &str) -> QuakeSyncError {
    match status {
        404 => QuakeSyncError::RepoNotFound(repo.to_string()),
        403 => QuakeSyncError::RateLimited,
        _ => QuakeSyncError::Upstream {
            source_name: SOURCE,
            status,
        },
    }
}

/// Decodes the commit array into normalized events, validating the schema
/// at the boundary.
pub fn decode_commits(body: &str) -> Result<Vec<CommitEvent>> {
    let wire: Vec<WireCommit> =
        serde_json::from_str(body).map_err(|e| QuakeSyncError::Decode {
            source_name: SOURCE,
            detail: e.to_string(),
        })?;

    Ok(wire
        .into_iter()
        .map(|c| CommitEvent {
            id: c.sha,
            timestamp: c.commit.author.date,
            message: c.commit.message,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_well_formed_commits() {
        let body = r#"[
            {
                "sha": "abc123",
                "commit": {
                    "author": { "name": "dev", "date": "2024-03-15T10:05:00Z" },
                    "message": "tune bucketing\n\ndetails"
                },
                "url": "https://api.github.com/x"
            }
        ]"#;
        let commits = decode_commits(body).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, "abc123");
        assert_eq!(
            commits[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 15, 10, 5, 0).unwrap()
        );
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let body = r#"[{ "sha": "abc123", "commit": { "message": "no author" } }]"#;
        match decode_commits(body) {
            Err(QuakeSyncError::Decode { source_name, .. }) => {
                assert_eq!(source_name, "GitHub")
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert!(matches!(
            status_error(404, "a/b"),
            QuakeSyncError::RepoNotFound(_)
        ));
        assert!(matches!(status_error(403, "a/b"), QuakeSyncError::RateLimited));
        assert!(matches!(
            status_error(500, "a/b"),
            QuakeSyncError::Upstream { status: 500, .. }
        ));
    }

    #[test]
    fn url_carries_since_and_page_cap() {
        let since = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
        let url = commits_url("https://api.github.com", "facebook/react", since);
        assert!(url.starts_with("https://api.github.com/repos/facebook/react/commits?since=2024-03-14T12:00:00Z"));
        assert!(url.ends_with("per_page=100"));
    }
}
