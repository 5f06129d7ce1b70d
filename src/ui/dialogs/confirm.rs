//! Confirm dialog widget

use super::{render_frame, DialogWidget, WidgetAction, WidgetProps};
use crate::config::colors;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, Frame};

/// Yes/no question; answers resolve the caller's `ConfirmHandle`
pub struct ConfirmWidget;

impl DialogWidget for ConfirmWidget {
    fn render(&self, f: &mut Frame, area: Rect, props: &WidgetProps<'_>) {
        let hints = Line::from(vec![
            Span::styled(" [y] Confirm ", Style::default().fg(colors::ACCEPT)),
            Span::raw(" "),
            Span::styled(" [n] Cancel ", Style::default().fg(colors::DECLINE)),
        ]);
        render_frame(f, area, props, hints, colors::HIGHLIGHT);
    }

    fn handle_key(&self, key: KeyEvent) -> WidgetAction {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => WidgetAction::Accept,
            KeyCode::Char('n' | 'N') => WidgetAction::Decline,
            KeyCode::Esc => WidgetAction::Close,
            _ => WidgetAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys() {
        assert_eq!(ConfirmWidget.handle_key(key(KeyCode::Char('y'))), WidgetAction::Accept);
        assert_eq!(ConfirmWidget.handle_key(key(KeyCode::Enter)), WidgetAction::Accept);
        assert_eq!(ConfirmWidget.handle_key(key(KeyCode::Char('n'))), WidgetAction::Decline);
        assert_eq!(ConfirmWidget.handle_key(key(KeyCode::Esc)), WidgetAction::Close);
        assert_eq!(ConfirmWidget.handle_key(key(KeyCode::Char('q'))), WidgetAction::None);
    }

    #[test]
    fn test_render_shows_title_content_and_actions() {
        let props = WidgetProps {
            visible: true,
            focused: true,
            title: "Q",
            content: "Are you sure?",
        };
        let screen = super::super::tests::draw(&ConfirmWidget, &props);

        assert!(screen.contains(" Q "));
        assert!(screen.contains("Are you sure?"));
        assert!(screen.contains("Confirm"));
        assert!(screen.contains("Cancel"));
    }
}
