use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Returns a compact intensity bar of fixed width (3) based on count/max.
pub fn intensity_bar(count: u32, max: u32) -> String {
    const WIDTH: usize = 3;
    if max == 0 {
        return "▁▁▁".to_string();
    }

    let ratio = count as f64 / max as f64;
    let filled = ((ratio * WIDTH as f64).round() as usize).min(WIDTH);
    let intensity_idx =
        ((ratio * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);

    let bar_char = LEVELS[intensity_idx];
    bar_char.repeat(filled) + &"░".repeat(WIDTH - filled)
}

/// Style for the synchronicity score banner, hotter as agreement rises.
pub fn score_style(score: u32) -> Style {
    if score >= 80 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if score >= 50 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if score >= 20 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Blue)
    }
}
