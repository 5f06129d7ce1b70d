//! Keyboard input handling

use super::App;
use crate::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Handle keyboard input
    ///
    /// The focused dialog gets first refusal; only keys it ignores reach the
    /// background screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle Ctrl+C always
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some((id, action)) = self.root.handle_key(key) {
            tracing::debug!(dialog_id = %id, ?action, "Key handled by dialog");
            return;
        }

        // Any key closes the help overlay
        if self.show_help {
            self.show_help = false;
            return;
        }

        let action = action_for(key);
        self.dispatch(action);
    }
}

/// Map a background-screen key to an action
pub fn action_for(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') => Action::OpenConfirm,
        KeyCode::Char('n') => Action::OpenNormal,
        KeyCode::Char('b') => Action::OpenBurst,
        KeyCode::Char('x') => Action::ClearResults,
        KeyCode::Char('?' | 'H') => Action::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping() {
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(action_for(key('c')), Action::OpenConfirm);
        assert_eq!(action_for(key('n')), Action::OpenNormal);
        assert_eq!(action_for(key('b')), Action::OpenBurst);
        assert_eq!(action_for(key('?')), Action::ToggleHelp);
        assert_eq!(action_for(key('q')), Action::Quit);
        assert_eq!(action_for(key('z')), Action::None);
    }
}
