//! UI helper functions

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Truncate a string to max_len characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

/// Create a centered rect with percentage-based dimensions
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

/// Shift `area` down-right by `step` cells per stack level, staying inside `bounds`
pub fn cascade(area: Rect, level: usize, bounds: Rect) -> Rect {
    let level = level.min(8) as u16;
    let max_x = bounds.right().saturating_sub(area.width).max(bounds.x);
    let max_y = bounds.bottom().saturating_sub(area.height).max(bounds.y);
    Rect {
        x: area.x.saturating_add(level * 2).min(max_x),
        y: area.y.saturating_add(level).min(max_y),
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("héllo wörld", 3), "hé…");
        assert_eq!(truncate("x", 0), "");
    }

    #[test]
    fn test_cascade_stays_in_bounds() {
        let bounds = Rect::new(0, 0, 40, 20);
        let area = Rect::new(10, 5, 20, 10);

        assert_eq!(cascade(area, 0, bounds), area);
        assert_eq!(cascade(area, 1, bounds), Rect::new(12, 6, 20, 10));
        let deep = cascade(area, 50, bounds);
        assert!(deep.right() <= bounds.right());
        assert!(deep.bottom() <= bounds.bottom());
    }
}
