//! Dialog widgets
//!
//! Each [`DialogKind`] maps to exactly one widget through [`widget_for`].
//! Widgets are stateless: they draw from props and translate keys into a
//! [`WidgetAction`] that the dialog root applies.

mod confirm;
mod normal;

pub use confirm::ConfirmWidget;
pub use normal::NormalWidget;

use crate::config::{colors, DialogConfig};
use crate::dialog::DialogKind;
use crate::root::DialogRoot;
use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::{cascade, centered_rect};

/// What a widget asks the root to do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Key not handled
    None,
    /// Close request (dismiss)
    Close,
    /// Close and resolve a confirm with `true`
    Accept,
    /// Close and resolve a confirm with `false`
    Decline,
}

/// Everything a widget needs to draw one dialog
#[derive(Debug, Clone, Copy)]
pub struct WidgetProps<'a> {
    /// False while the dialog is closing
    pub visible: bool,
    /// Topmost open dialog
    pub focused: bool,
    pub title: &'a str,
    pub content: &'a str,
}

pub trait DialogWidget: Sync {
    fn render(&self, f: &mut Frame, area: Rect, props: &WidgetProps<'_>);

    fn handle_key(&self, key: KeyEvent) -> WidgetAction;
}

/// Kind -> widget routing
pub fn widget_for(kind: &DialogKind) -> &'static dyn DialogWidget {
    match kind {
        DialogKind::Confirm(_) => &ConfirmWidget,
        DialogKind::Normal => &NormalWidget,
    }
}

/// Draw every queued dialog, oldest first, so the newest ends up on top
pub fn render_root(f: &mut Frame, root: &DialogRoot, config: &DialogConfig) {
    let bounds = f.area();
    let base = centered_rect(config.width_percent, config.height_percent, bounds);
    let entries = root.entries();
    let focused = root.focused().map(|d| d.id);

    for (level, entry) in entries.iter().enumerate() {
        let area = cascade(base, level, bounds);
        let props = WidgetProps {
            visible: entry.visible,
            focused: Some(entry.record.id) == focused,
            title: &entry.record.title,
            content: &entry.record.content,
        };
        widget_for(&entry.record.kind).render(f, area, &props);
    }
}

/// Shared dialog chrome: bordered box, title, wrapped content, key hints
///
/// Closing dialogs are drawn dimmed with a plain border, standing in for the
/// close animation.
fn render_frame(f: &mut Frame, area: Rect, props: &WidgetProps<'_>, hints: Line<'_>, accent: Color) {
    let (border, text, border_type) = if !props.visible {
        (colors::DIM, colors::DIM, BorderType::Plain)
    } else if props.focused {
        (accent, colors::FG, BorderType::Double)
    } else {
        (colors::BORDER, colors::FG, BorderType::Rounded)
    };

    let block = Block::default()
        .title(format!(" {} ", props.title))
        .title_bottom(hints.centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .border_type(border_type)
        .style(Style::default().bg(colors::BG));

    let body = Paragraph::new(props.content)
        .style(Style::default().fg(text))
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ConfirmResolver;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::oneshot;

    pub(super) fn draw(widget: &dyn DialogWidget, props: &WidgetProps<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                widget.render(f, area, props);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_routing_is_by_kind() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let (tx, _rx) = oneshot::channel();
        let confirm = DialogKind::Confirm(ConfirmResolver::new(tx));
        let y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);

        assert_eq!(widget_for(&confirm).handle_key(y), WidgetAction::Accept);
        assert_eq!(widget_for(&DialogKind::Normal).handle_key(y), WidgetAction::None);
    }

    #[test]
    fn test_render_root_draws_queued_dialogs() {
        use crate::controller::{DialogController, DialogOptions};
        use crate::store::DialogStore;

        let store = DialogStore::create();
        let config = DialogConfig::default();
        let root = DialogRoot::mount(store.clone(), &config);
        DialogController::new(store).normal(DialogOptions::new("Heads up", "Saved"));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render_root(f, &root, &config)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Heads up"));
        assert!(screen.contains("Saved"));
    }
}
