//! Normal (informational) dialog widget

use super::{render_frame, DialogWidget, WidgetAction, WidgetProps};
use crate::config::colors;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, Frame};

pub struct NormalWidget;

impl DialogWidget for NormalWidget {
    fn render(&self, f: &mut Frame, area: Rect, props: &WidgetProps<'_>) {
        let hints = Line::from(Span::styled(" [Enter] OK ", Style::default().fg(colors::INFO)));
        render_frame(f, area, props, hints, colors::INFO);
    }

    fn handle_key(&self, key: KeyEvent) -> WidgetAction {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => WidgetAction::Close,
            _ => WidgetAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_enter_and_esc_close() {
        for code in [KeyCode::Enter, KeyCode::Esc] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(NormalWidget.handle_key(key), WidgetAction::Close);
        }
        let y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        assert_eq!(NormalWidget.handle_key(y), WidgetAction::None);
    }

    #[test]
    fn test_closing_dialog_still_drawn() {
        let props = WidgetProps {
            visible: false,
            focused: false,
            title: "T",
            content: "C",
        };
        let screen = super::super::tests::draw(&NormalWidget, &props);
        assert!(screen.contains(" T "));
        assert!(screen.contains("OK"));
    }
}
