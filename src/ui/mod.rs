//! Terminal rendering for queued dialogs
//!
//! [`dialogs::render_root`] is the only entry point apps need: call it last
//! in the draw closure so dialogs sit above the rest of the screen.

pub mod dialogs;
pub mod helpers;

pub use dialogs::{render_root, widget_for, DialogWidget, WidgetAction, WidgetProps};
