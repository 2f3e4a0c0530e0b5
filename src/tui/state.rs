use std::time::Instant;

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Dashboard,
    Feed,
}

pub struct TuiState {
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub loading: bool,
    pub repo_mode: bool,
    pub repo_input: String,
    pub feed_selected: usize,
    pub status_message: Option<(String, Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Dashboard,
            tab_index: 0,
            show_help: false,
            loading: false,
            repo_mode: false,
            repo_input: String::new(),
            feed_selected: 0,
            status_message: None,
        }
    }
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Status lines fade out after a few seconds.
    pub fn current_status(&self) -> Option<&str> {
        match &self.status_message {
            Some((message, at)) if at.elapsed().as_secs() < 4 => Some(message),
            _ => None,
        }
    }
}
