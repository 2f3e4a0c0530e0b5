use anyhow::Context;
use chrono::Utc;
use console::style;

use crate::app::Snapshot;
use crate::cli::CommonArgs;
use crate::fetch::FetchClient;
use crate::model::{FeedItem, FeedKind};

pub async fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let client = FetchClient::new(common.github_url.clone(), common.usgs_url.clone())
        .context("Failed to build HTTP client")?;

    let now = Utc::now();
    let (commits, quakes) = client
        .fetch_cycle(&common.repo, common.range, now)
        .await
        .context("Fetch cycle failed")?;

    let mut snapshot = Snapshot::compute(common.repo.clone(), common.range, now, commits, quakes);
    if let Some(limit) = limit {
        snapshot.feed.truncate(limit);
    }

    if json {
        output_json(&snapshot)?;
    } else if ndjson {
        output_ndjson(&snapshot.feed)?;
    } else {
        output_log(&snapshot.feed)?;
    }

    Ok(())
}

fn output_json(snapshot: &Snapshot) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&snapshot.feed_output())?);
    Ok(())
}

fn output_ndjson(items: &[FeedItem]) -> anyhow::Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

fn output_log(items: &[FeedItem]) -> anyhow::Result<()> {
    if items.is_empty() {
        println!("No events found in this period.");
        return Ok(());
    }

    println!("{}", style("Event Log").bold());
    println!("{}", "─".repeat(60));

    for item in items {
        let tag = match item.kind {
            FeedKind::Commit => style("GIT").cyan().bold(),
            FeedKind::Quake => style("GEO").red().bold(),
        };
        println!(
            "{} {} {}",
            tag,
            style(item.timestamp.format("%m/%d %H:%M")).dim(),
            item.description
        );
    }

    Ok(())
}
