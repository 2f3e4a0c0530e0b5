use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::fetch::{DEFAULT_GITHUB_BASE, DEFAULT_USGS_BASE};
use crate::model::TimeRange;

#[derive(Parser)]
#[command(name = "quakesync")]
#[command(about = "Correlates GitHub commit activity with global seismic events")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "aws/aws-sdk-js", help = "GitHub repository as owner/repo")]
    pub repo: String,

    #[arg(long, value_enum, default_value = "24h", help = "Lookback window")]
    pub range: TimeRange,

    #[arg(long, default_value = DEFAULT_GITHUB_BASE, help = "GitHub API base URL")]
    pub github_url: String,

    #[arg(long, default_value = DEFAULT_USGS_BASE, help = "USGS FDSN base URL")]
    pub usgs_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One fetch cycle, then the score, stat cards and bucketed timeline
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Merged commit/quake event log, newest first
    Feed {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Keep only the newest N items")]
        limit: Option<usize>,
    },
    /// Interactive terminal dashboard
    Dash,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson } => crate::stats::exec(self.common, json, ndjson).await,
            Commands::Feed { json, ndjson, limit } => {
                crate::feed_cmd::exec(self.common, json, ndjson, limit).await
            }
            Commands::Dash => {
                tokio::task::block_in_place(|| crate::tui::run(self.common))
                    .map_err(|e| anyhow::anyhow!(e))
            }
        }
    }
}
