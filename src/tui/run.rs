use std::io;
use std::sync::mpsc;

use chrono::Utc;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Handle;

use crate::app::{Dashboard, Snapshot};
use crate::cli::CommonArgs;
use crate::fetch::FetchClient;
use crate::model::TimeRange;

use super::input::{handle_repo_input, scroll_feed, RepoInput};
use super::state::{TuiState, ViewMode};
use super::views::{draw_dashboard_view, draw_feed_view, draw_help_overlay};

struct CycleOutcome {
    generation: u64,
    result: Result<Snapshot, String>,
}

/// Kicks off one fetch cycle on the runtime. In-flight cycles are never
/// cancelled; the generation tag makes superseded results land in the bin.
fn start_cycle(
    handle: &Handle,
    client: &FetchClient,
    dash: &mut Dashboard,
    state: &mut TuiState,
    tx: &mpsc::Sender<CycleOutcome>,
) {
    let generation = dash.begin_cycle();
    state.loading = true;

    let client = client.clone();
    let repo = dash.repo.clone();
    let range = dash.range;
    let tx = tx.clone();

    handle.spawn(async move {
        let now = Utc::now();
        let result = client
            .fetch_cycle(&repo, range, now)
            .await
            .map(|(commits, quakes)| Snapshot::compute(repo, range, now, commits, quakes))
            .map_err(|e| e.to_string());
        let _ = tx.send(CycleOutcome { generation, result });
    });
}

pub fn run(common: CommonArgs) -> io::Result<()> {
    let handle = Handle::current();
    let client = FetchClient::new(common.github_url.clone(), common.usgs_url.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let (tx, rx) = mpsc::channel::<CycleOutcome>();
    let mut dash = Dashboard::new(common.repo.clone(), common.range);
    let mut state = TuiState::default();

    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    start_cycle(&handle, &client, &mut dash, &mut state, &tx);

    loop {
        while let Ok(outcome) = rx.try_recv() {
            if dash.apply(outcome.generation, outcome.result) {
                state.loading = false;
                let feed_len = dash.snapshot.as_ref().map(|s| s.feed.len()).unwrap_or(0);
                if state.feed_selected >= feed_len {
                    state.feed_selected = feed_len.saturating_sub(1);
                }
            }
        }

        terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = ratatui::layout::Layout::default()
                .direction(ratatui::layout::Direction::Vertical)
                .constraints([
                    ratatui::layout::Constraint::Length(3),
                    ratatui::layout::Constraint::Min(0),
                ])
                .split(size);

            let tabs = ratatui::widgets::Tabs::new(vec!["Dashboard", "Feed"])
                .block(
                    ratatui::widgets::Block::default()
                        .borders(ratatui::widgets::Borders::ALL)
                        .title("View Mode"),
                )
                .highlight_style(
                    ratatui::style::Style::default()
                        .fg(ratatui::style::Color::Yellow)
                        .add_modifier(ratatui::style::Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            state.view_mode = match state.tab_index {
                0 => ViewMode::Dashboard,
                _ => ViewMode::Feed,
            };

            match state.view_mode {
                ViewMode::Dashboard => draw_dashboard_view(f, chunks[1], &dash, &state),
                ViewMode::Feed => draw_feed_view(f, chunks[1], &dash, &state),
            }
        })?;

        if poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                if state.repo_mode {
                    if let RepoInput::Submitted(repo) =
                        handle_repo_input(key_event.code, &mut state)
                    {
                        dash.repo = repo;
                        start_cycle(&handle, &client, &mut dash, &mut state, &tx);
                    }
                    continue;
                }

                let feed_len = dash.snapshot.as_ref().map(|s| s.feed.len()).unwrap_or(0);

                match key_event.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
                    KeyCode::Char('r') => {
                        start_cycle(&handle, &client, &mut dash, &mut state, &tx);
                    }
                    KeyCode::Char('/') => {
                        state.repo_mode = true;
                        state.repo_input = dash.repo.clone();
                    }
                    KeyCode::Char('1') => {
                        dash.range = TimeRange::Last24h;
                        start_cycle(&handle, &client, &mut dash, &mut state, &tx);
                    }
                    KeyCode::Char('2') => {
                        dash.range = TimeRange::Last7d;
                        start_cycle(&handle, &client, &mut dash, &mut state, &tx);
                    }
                    KeyCode::Char('3') => {
                        dash.range = TimeRange::Last30d;
                        start_cycle(&handle, &client, &mut dash, &mut state, &tx);
                    }
                    KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 2,
                    KeyCode::BackTab => {
                        state.tab_index = if state.tab_index == 0 { 1 } else { 0 };
                    }
                    KeyCode::Up | KeyCode::Char('k') => scroll_feed(&mut state, -1, feed_len),
                    KeyCode::Down | KeyCode::Char('j') => scroll_feed(&mut state, 1, feed_len),
                    KeyCode::PageUp => scroll_feed(&mut state, -10, feed_len),
                    KeyCode::PageDown => scroll_feed(&mut state, 10, feed_len),
                    KeyCode::Home => state.feed_selected = 0,
                    KeyCode::End => state.feed_selected = feed_len.saturating_sub(1),
                    _ => {}
                }
            }
        }
    }

    terminal.clear()?;
    disable_raw_mode()?;
    Ok(())
}
