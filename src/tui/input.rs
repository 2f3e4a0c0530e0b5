use crossterm::event::KeyCode;

use crate::fetch::validate_repo;

use super::state::TuiState;

/// Outcome of a keypress while the repo input line is active.
pub enum RepoInput {
    Pending,
    Cancelled,
    Submitted(String),
}

/// Edits the repo input line. Submission is only accepted when the text
/// carries the owner/repo separator; anything else stays in input mode with
/// a status hint.
pub fn handle_repo_input(code: KeyCode, state: &mut TuiState) -> RepoInput {
    match code {
        KeyCode::Esc => {
            state.repo_mode = false;
            state.repo_input.clear();
            RepoInput::Cancelled
        }
        KeyCode::Enter => {
            let candidate = state.repo_input.trim().to_string();
            if validate_repo(&candidate).is_ok() {
                state.repo_mode = false;
                state.repo_input.clear();
                RepoInput::Submitted(candidate)
            } else {
                state.set_status("expected owner/repo");
                RepoInput::Pending
            }
        }
        KeyCode::Backspace => {
            state.repo_input.pop();
            RepoInput::Pending
        }
        KeyCode::Char(c) => {
            state.repo_input.push(c);
            RepoInput::Pending
        }
        _ => RepoInput::Pending,
    }
}

pub fn scroll_feed(state: &mut TuiState, delta: i64, len: usize) {
    if len == 0 {
        state.feed_selected = 0;
        return;
    }
    let next = state.feed_selected as i64 + delta;
    state.feed_selected = next.clamp(0, len as i64 - 1) as usize;
}
