pub mod input;

use dialog_queue::DialogId;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(crossterm::event::KeyEvent),
    /// The dialog store installed a new list
    DialogsChanged,
    /// A confirm dialog opened from the demo screen was answered
    ConfirmResolved {
        /// Record the answer belongs to
        id: DialogId,
        /// Title shown in the result log
        title: String,
        /// The answer
        value: bool,
    },
}
