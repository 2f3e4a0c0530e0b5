use anyhow::Context;
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::Snapshot;
use crate::cli::CommonArgs;
use crate::fetch::FetchClient;

pub async fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let client = FetchClient::new(common.github_url.clone(), common.usgs_url.clone())
        .context("Failed to build HTTP client")?;

    let spinner = (!json && !ndjson).then(|| fetch_spinner(&common.repo));

    let now = Utc::now();
    let fetched = client.fetch_cycle(&common.repo, common.range, now).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let (commits, quakes) = fetched.context("Fetch cycle failed")?;
    let snapshot = Snapshot::compute(common.repo.clone(), common.range, now, commits, quakes);

    if json {
        output_json(&snapshot)?;
    } else if ndjson {
        output_ndjson(&snapshot)?;
    } else {
        output_report(&snapshot)?;
    }

    Ok(())
}

fn fetch_spinner(repo: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching {repo} commits and USGS events..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn output_json(snapshot: &Snapshot) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&snapshot.stats_output())?);
    Ok(())
}

fn output_ndjson(snapshot: &Snapshot) -> anyhow::Result<()> {
    for point in &snapshot.series {
        println!("{}", serde_json::to_string(point)?);
    }
    Ok(())
}

fn output_report(snapshot: &Snapshot) -> anyhow::Result<()> {
    println!(
        "{} {}",
        style("Synch score:").bold(),
        style(format!("{}%", snapshot.synchronicity)).yellow().bold()
    );
    println!(
        "Correlating {} velocity with global seismic activity over the last {}",
        style(&snapshot.repo).cyan(),
        snapshot.range.label()
    );
    println!("{}", "─".repeat(60));

    println!("Total commits: {}", style(snapshot.commits.len()).cyan());
    println!("Seismic events: {}", style(snapshot.quakes.len()).red());
    println!(
        "Avg magnitude: {}",
        style(format!("{:.2}", snapshot.average_magnitude)).magenta()
    );
    println!(
        "Chaos ratio: {} commits per quake",
        style(format!("{:.1}", snapshot.chaos_ratio)).yellow()
    );

    if snapshot.truncated {
        println!(
            "{}",
            style("Note: upstream page caps were hit, results may be truncated").dim()
        );
    }

    println!("\n{}", style("Correlation Timeline").bold());
    println!("{}", "─".repeat(60));

    let max_commits = snapshot.series.iter().map(|p| p.commit_count).max().unwrap_or(1);
    let max_quakes = snapshot.series.iter().map(|p| p.quake_count).max().unwrap_or(1);

    for point in &snapshot.series {
        println!(
            "{} {} {} commits: {:>3}, quakes: {:>3}",
            point.key,
            style(intensity_char(point.commit_count, max_commits)).green(),
            style(intensity_char(point.quake_count, max_quakes)).red(),
            point.commit_count,
            point.quake_count
        );
    }

    println!("\n{}", style("Legend").bold());
    println!("  {} commit intensity", style("▁▃▅▇█").green());
    println!("  {} quake intensity", style("▁▃▅▇█").red());

    Ok(())
}

fn intensity_char(count: u32, max: u32) -> &'static str {
    if max == 0 {
        return " ";
    }
    match ((count as f64 / max as f64) * 5.0) as u32 {
        0 => " ",
        1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}
