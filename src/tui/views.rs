use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Sparkline, Table};
use ratatui::Frame;

use crate::app::Dashboard;
use crate::model::FeedKind;

use super::draw::{intensity_bar, score_style};
use super::layout::{centered_rect, visible_window};
use super::state::TuiState;

fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn truncate_text(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

pub fn draw_dashboard_view(f: &mut Frame, area: Rect, dash: &Dashboard, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    draw_banner(f, chunks[0], dash, state);
    draw_stat_cards(f, chunks[1], dash);
    draw_timeline(f, chunks[2], dash);
}

fn draw_banner(f: &mut Frame, area: Rect, dash: &Dashboard, state: &TuiState) {
    let mut lines = Vec::new();

    match &dash.snapshot {
        Some(snapshot) => {
            lines.push(Line::from(vec![
                Span::styled("SYNCH SCORE: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{}%", snapshot.synchronicity),
                    score_style(snapshot.synchronicity),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("Correlating "),
                Span::styled(snapshot.repo.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(" velocity with global seismic activity, last "),
                Span::raw(snapshot.range.label()),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "SYNCH SCORE: --",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(format!(
                "Correlating {} velocity with global seismic activity, last {}",
                dash.repo,
                dash.range.label()
            )));
        }
    }

    if state.repo_mode {
        lines.push(Line::from(vec![
            Span::styled("repo> ", Style::default().fg(Color::Yellow)),
            Span::raw(state.repo_input.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]));
    } else if let Some(error) = &dash.error {
        lines.push(Line::from(Span::styled(
            format!("DATA STREAM ERROR: {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    } else if state.loading {
        lines.push(Line::from(Span::styled(
            "FETCHING LIVE DATA...",
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(status) = state.current_status() {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    } else if dash.snapshot.as_ref().is_some_and(|s| s.truncated) {
        lines.push(Line::from(Span::styled(
            "Upstream page caps hit; results may be truncated",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let banner = Paragraph::new(lines).block(
        Block::default()
            .title("Code vs Tectonics")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(banner, area);
}

fn draw_stat_cards(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (commits, quakes, avg_mag, chaos) = match &dash.snapshot {
        Some(s) => (
            s.commits.len().to_string(),
            s.quakes.len().to_string(),
            format!("{:.2}", s.average_magnitude),
            format!("{:.1}", s.chaos_ratio),
        ),
        None => ("--".into(), "--".into(), "--".into(), "--".into()),
    };

    let cards = [
        ("Total Commits", commits, Color::Cyan),
        ("Seismic Events", quakes, Color::Red),
        ("Avg Magnitude", avg_mag, Color::Magenta),
        ("Chaos Ratio", chaos, Color::Yellow),
    ];

    for (i, (title, value, color)) in cards.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(*title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        f.render_widget(card, chunks[i]);
    }
}

fn draw_timeline(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let Some(snapshot) = &dash.snapshot else {
        let placeholder = Paragraph::new("No data yet. Press 'r' to fetch.").block(
            Block::default()
                .title("Correlation Timeline")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        f.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let max_commits = snapshot.series.iter().map(|p| p.commit_count).max().unwrap_or(1);
    let max_quakes = snapshot.series.iter().map(|p| p.quake_count).max().unwrap_or(1);

    // Show the newest slots that fit the viewport.
    let view_height = (chunks[0].height as usize).saturating_sub(3);
    let skip = snapshot.series.len().saturating_sub(view_height);

    let rows: Vec<Row> = snapshot
        .series
        .iter()
        .skip(skip)
        .map(|point| {
            let commit_cell = Cell::from(format!(
                "{:>3} {}",
                point.commit_count,
                intensity_bar(point.commit_count, max_commits)
            ))
            .style(Style::default().fg(Color::Green));
            let quake_cell = Cell::from(format!(
                "{:>3} {}",
                point.quake_count,
                intensity_bar(point.quake_count, max_quakes)
            ))
            .style(Style::default().fg(Color::Red));

            Row::new(vec![
                Cell::from(point.key.clone()).style(Style::default().fg(Color::White)),
                commit_cell,
                quake_cell,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(Row::new([
        header_cell("Bucket", Color::Yellow),
        header_cell("Commits", Color::Green),
        header_cell("Quakes", Color::Red),
    ]))
    .block(
        Block::default()
            .title("Correlation Timeline")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(table, chunks[0]);

    draw_spark_panel(f, chunks[1], dash);
}

fn draw_spark_panel(f: &mut Frame, area: Rect, dash: &Dashboard) {
    let Some(snapshot) = &dash.snapshot else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let commit_data: Vec<u64> = snapshot.series.iter().map(|p| p.commit_count as u64).collect();
    let quake_data: Vec<u64> = snapshot.series.iter().map(|p| p.quake_count as u64).collect();

    let commit_spark = Sparkline::default()
        .block(
            Block::default()
                .title("Commits")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .data(&commit_data)
        .style(Style::default().fg(Color::Green));
    f.render_widget(commit_spark, chunks[0]);

    let quake_spark = Sparkline::default()
        .block(
            Block::default()
                .title("Quakes")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .data(&quake_data)
        .style(Style::default().fg(Color::Red));
    f.render_widget(quake_spark, chunks[1]);
}

pub fn draw_feed_view(f: &mut Frame, area: Rect, dash: &Dashboard, state: &TuiState) {
    let Some(snapshot) = &dash.snapshot else {
        let placeholder = Paragraph::new("No events yet. Press 'r' to fetch.").block(
            Block::default()
                .title("Live Event Log")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        f.render_widget(placeholder, area);
        return;
    };

    if snapshot.feed.is_empty() {
        let empty = Paragraph::new("No events found in this period.").block(
            Block::default()
                .title("Live Event Log")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        f.render_widget(empty, area);
        return;
    }

    let view_height = (area.height as usize).saturating_sub(3);
    let (start, end) = visible_window(snapshot.feed.len(), state.feed_selected, view_height);

    let rows: Vec<Row> = snapshot.feed[start..end]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = start + i == state.feed_selected;
            let (tag, tag_color) = match item.kind {
                FeedKind::Commit => ("GIT", Color::Cyan),
                FeedKind::Quake => ("GEO", Color::Red),
            };
            let desc_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(tag).style(
                    Style::default().fg(tag_color).add_modifier(Modifier::BOLD),
                ),
                Cell::from(item.timestamp.format("%m/%d %H:%M").to_string())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate_text(&item.description, 80)).style(desc_style),
            ])
        })
        .collect();

    let title = format!(
        "Live Event Log ({}/{})",
        state.feed_selected + 1,
        snapshot.feed.len()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Percentage(100),
        ],
    )
    .header(Row::new([
        header_cell("Src", Color::Yellow),
        header_cell("Time", Color::Yellow),
        header_cell("Event", Color::Yellow),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(table, area);
}

pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  q          quit"),
        Line::from("  r          refresh data"),
        Line::from("  Tab        switch view"),
        Line::from("  1 / 2 / 3  last 24h / 7d / 30d"),
        Line::from("  /          enter repository (owner/repo)"),
        Line::from("  j / k      scroll feed"),
        Line::from("  h / F1     toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "A failed refresh keeps the last good data on screen.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(help, popup);
}
