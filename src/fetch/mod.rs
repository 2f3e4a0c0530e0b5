pub mod github;
pub mod usgs;

pub use github::COMMIT_PAGE_SIZE;
pub use usgs::{MIN_MAGNITUDE, QUAKE_LIMIT};

use chrono::{DateTime, Utc};

use crate::error::{QuakeSyncError, Result};
use crate::model::{CommitEvent, QuakeEvent, TimeRange};

pub const DEFAULT_GITHUB_BASE: &str = "https://api.github.com";
pub const DEFAULT_USGS_BASE: &str = "https://earthquake.usgs.gov";

/// Checks the only structural requirement on a repository identifier: an
/// owner/name separator. Everything else is for GitHub to judge.
pub fn validate_repo(repo: &str) -> Result<()> {
    if repo.contains('/') {
        Ok(())
    } else {
        Err(QuakeSyncError::InvalidRepo(repo.to_string()))
    }
}

/// HTTP fetcher for both upstream feeds.
#[derive(Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    github_base: String,
    usgs_base: String,
}

impl FetchClient {
    pub fn new(github_base: String, usgs_base: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quakesync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            github_base,
            usgs_base,
        })
    }

    /// Recent commit activity for `repo`, bounded below by `since`.
    pub async fn fetch_commits(
        &self,
        repo: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitEvent>> {
        let url = github::commits_url(&self.github_base, repo, since);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(github::status_error(status.as_u16(), repo));
        }
        github::decode_commits(&response.text().await?)
    }

    /// Global seismic events since `since`, magnitude 2.5 and up.
    pub async fn fetch_quakes(&self, since: DateTime<Utc>) -> Result<Vec<QuakeEvent>> {
        let url = usgs::query_url(&self.usgs_base, since);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|_| QuakeSyncError::Connection)?;
        if !response.status().is_success() {
            return Err(QuakeSyncError::Connection);
        }
        usgs::decode_quakes(&response.text().await?)
    }

    /// One full fetch cycle: both sources concurrently, all-or-nothing.
    /// Either failure fails the cycle; partial success is not a thing.
    pub async fn fetch_cycle(
        &self,
        repo: &str,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<(Vec<CommitEvent>, Vec<QuakeEvent>)> {
        validate_repo(repo)?;
        let since = now - range.lookback();
        tokio::try_join!(self.fetch_commits(repo, since), self.fetch_quakes(since))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_needs_a_separator() {
        assert!(validate_repo("facebook/react").is_ok());
        assert!(matches!(
            validate_repo("react"),
            Err(QuakeSyncError::InvalidRepo(_))
        ));
    }
}
