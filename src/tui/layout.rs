use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Window of feed indices to render so the selection stays centered while
/// scrolling through a list longer than the viewport.
pub fn visible_window(len: usize, selected: usize, view_height: usize) -> (usize, usize) {
    if len == 0 || view_height == 0 {
        return (0, 0);
    }
    let start = selected
        .saturating_sub(view_height / 2)
        .min(len.saturating_sub(view_height));
    let end = (start + view_height).min(len);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_clamps_to_list_bounds() {
        assert_eq!(visible_window(0, 0, 10), (0, 0));
        assert_eq!(visible_window(5, 0, 10), (0, 5));
        assert_eq!(visible_window(100, 0, 10), (0, 10));
        assert_eq!(visible_window(100, 99, 10), (90, 100));
    }

    #[test]
    fn selection_stays_centered_mid_list() {
        let (start, end) = visible_window(100, 50, 10);
        assert!(start <= 50 && 50 < end);
    }
}
