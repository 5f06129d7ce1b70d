#![allow(clippy::module_name_repetitions)] // e.g., DialogConfig in config module is fine
#![allow(clippy::must_use_candidate)] // Not all getters need #[must_use]
#![allow(clippy::missing_panics_doc)] // Lock poisoning is recovered, nothing panics
#![allow(clippy::cast_possible_truncation)] // Millisecond durations fit in u64
#![allow(clippy::doc_markdown)] // Don't require backticks around TOML, ratatui, etc.

//! dialog-queue - imperative dialogs for ratatui apps
//!
//! Lets any part of an application open a modal dialog without owning widget
//! state or threading visibility flags through its components:
//!
//! - [`DialogController::confirm`] queues a yes/no dialog and returns a
//!   future resolving to the answer
//! - [`DialogController::normal`] queues an informational dialog
//! - [`DialogRoot`] subscribes to the [`DialogStore`], renders the queue and
//!   runs each dialog's open -> closing -> removed lifecycle
//!
//! ```ignore
//! let store = DialogStore::create();
//! let root = DialogRoot::mount(store.clone(), &DialogConfig::default());
//! let dialogs = DialogController::new(store);
//!
//! let answer = dialogs.confirm(DialogOptions::new("Delete", "Really delete?"));
//! // ... draw with ui::render_root(f, &root, &config), feed keys to root.handle_key ...
//! if answer.await { /* delete */ }
//! ```

pub mod config;
pub mod controller;
pub mod dialog;
pub mod errors;
pub mod root;
pub mod store;
pub mod ui;

pub use config::{DialogConfig, DialogQueueConfig};
pub use controller::{ConfirmHandle, DialogController, DialogOptions};
pub use dialog::{ConfirmResolver, DialogId, DialogKind, DialogPhase, DialogRecord};
pub use errors::{DialogQueueError, Result};
pub use root::{DialogEntry, DialogRoot};
pub use store::{DialogStore, SubscriptionId};
