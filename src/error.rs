use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuakeSyncError>;

#[derive(Error, Debug)]
pub enum QuakeSyncError {
    #[error("repo \"{0}\" not found")]
    RepoNotFound(String),
    #[error("GitHub API rate limit exceeded")]
    RateLimited,
    #[error("USGS API connection failed")]
    Connection,
    #[error("{source_name} returned HTTP {status}")]
    Upstream {
        source_name: &'static str,
        status: u16,
    },
    #[error("malformed {source_name} payload: {detail}")]
    Decode {
        source_name: &'static str,
        detail: String,
    },
    #[error("invalid repository \"{0}\": expected owner/repo")]
    InvalidRepo(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
