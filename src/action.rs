//! Application actions
//!
//! Keys on the background screen map to these, following the
//! message-passing pattern common in ratatui applications. Keys aimed at a
//! dialog never become actions; the dialog root consumes them.

/// Actions that can be triggered from the background screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Queue a confirm dialog and log its answer
    OpenConfirm,

    /// Queue an informational dialog
    OpenNormal,

    /// Queue two confirm dialogs at once (each answered independently)
    OpenBurst,

    /// Toggle help overlay
    ToggleHelp,

    /// Clear the result log
    ClearResults,

    /// Quit the application
    Quit,

    /// No action (used for unhandled inputs)
    None,
}

impl Action {
    /// Check if this action should trigger a re-render
    pub fn should_render(&self) -> bool {
        !matches!(self, Action::None)
    }
}
