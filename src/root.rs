//! Dialog root: the render coordinator
//!
//! A root subscribes to a [`DialogStore`], keeps the latest list for
//! rendering, and runs each dialog's close lifecycle:
//!
//! ```text
//! Open --request_close--> Closing --grace period--> Removed
//! ```
//!
//! Closing is tracked in a side-table keyed by id rather than by rewriting
//! records, so the widget can play its close animation while the record is
//! still queued. Removal is a deferred tokio task; dropping the root aborts
//! every pending removal so a torn-down view never mutates the store.

use crate::config::DialogConfig;
use crate::dialog::{ConfirmResolver, DialogId, DialogPhase, DialogRecord};
use crate::store::{DialogStore, SubscriptionId};
use crate::ui::dialogs::{widget_for, WidgetAction};
use crossterm::event::KeyEvent;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;

#[derive(Default)]
struct RootState {
    /// Latest list delivered by the store
    dialogs: Vec<DialogRecord>,
    /// Closing ids and the removal timer for each
    closing: HashMap<DialogId, AbortHandle>,
}

impl RootState {
    fn contains(&self, id: DialogId) -> bool {
        self.dialogs.iter().any(|d| d.id == id)
    }
}

/// A record paired with its effective visibility
#[derive(Debug, Clone)]
pub struct DialogEntry {
    pub record: DialogRecord,
    pub visible: bool,
}

/// Mounted view over a dialog store
pub struct DialogRoot {
    store: DialogStore,
    grace: Duration,
    state: Arc<Mutex<RootState>>,
    subscription: Option<SubscriptionId>,
}

impl std::fmt::Debug for DialogRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("DialogRoot")
            .field("dialogs", &state.dialogs.len())
            .field("closing", &state.closing.len())
            .field("mounted", &self.subscription.is_some())
            .finish()
    }
}

fn lock(state: &Mutex<RootState>) -> MutexGuard<'_, RootState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DialogRoot {
    /// Subscribe to `store` and start rendering its dialogs
    ///
    /// Dialogs queued before mounting are picked up immediately.
    pub fn mount(store: DialogStore, config: &DialogConfig) -> Self {
        Self::mount_with_listener(store, config, |_| {})
    }

    /// Like [`mount`](Self::mount), also forwarding each change to `on_change`
    ///
    /// The callback runs synchronously inside `set_all`, after the root has
    /// taken the new list. Apps use it to wake their render loop.
    pub fn mount_with_listener<F>(store: DialogStore, config: &DialogConfig, on_change: F) -> Self
    where
        F: Fn(&[DialogRecord]) + Send + Sync + 'static,
    {
        let state = Arc::new(Mutex::new(RootState {
            dialogs: store.get_all(),
            closing: HashMap::new(),
        }));

        let listener_state = Arc::clone(&state);
        let subscription = store.subscribe(move |list| {
            {
                let mut state = lock(&listener_state);
                state.dialogs = list.to_vec();
                // Drop side-table entries for records that left the list
                let RootState { dialogs, closing } = &mut *state;
                closing.retain(|id, timer| {
                    let present = dialogs.iter().any(|d| d.id == *id);
                    if !present {
                        timer.abort();
                    }
                    present
                });
            }
            on_change(list);
        });

        tracing::debug!(
            subscription = %subscription,
            queued = lock(&state).dialogs.len(),
            grace_ms = config.close_grace_ms,
            "Dialog root mounted"
        );

        Self {
            store,
            grace: config.grace_period(),
            state,
            subscription: Some(subscription),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Unsubscribe and cancel every pending removal
    ///
    /// Records that were closing stay in the store; a root mounted later sees
    /// them as open again. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
            let mut state = lock(&self.state);
            let cancelled = state.closing.len();
            for (_, timer) in state.closing.drain() {
                timer.abort();
            }
            tracing::debug!(subscription = %id, cancelled, "Dialog root unmounted");
        }
    }

    /// Snapshot of the queued records, in insertion order
    pub fn dialogs(&self) -> Vec<DialogRecord> {
        lock(&self.state).dialogs.clone()
    }

    /// Records with their effective visibility, in insertion order
    pub fn entries(&self) -> Vec<DialogEntry> {
        let state = lock(&self.state);
        state
            .dialogs
            .iter()
            .map(|record| DialogEntry {
                record: record.clone(),
                visible: !state.closing.contains_key(&record.id),
            })
            .collect()
    }

    pub fn phase(&self, id: DialogId) -> DialogPhase {
        let state = lock(&self.state);
        if !state.contains(id) {
            DialogPhase::Removed
        } else if state.closing.contains_key(&id) {
            DialogPhase::Closing
        } else {
            DialogPhase::Open
        }
    }

    pub fn is_visible(&self, id: DialogId) -> bool {
        self.phase(id) == DialogPhase::Open
    }

    /// Topmost open dialog, the one receiving keys
    pub fn focused(&self) -> Option<DialogRecord> {
        let state = lock(&self.state);
        state
            .dialogs
            .iter()
            .rev()
            .find(|d| !state.closing.contains_key(&d.id))
            .cloned()
    }

    /// Number of open (not closing) dialogs
    pub fn open_count(&self) -> usize {
        let state = lock(&self.state);
        state
            .dialogs
            .iter()
            .filter(|d| !state.closing.contains_key(&d.id))
            .count()
    }

    /// Open -> Closing, scheduling removal after the grace period
    ///
    /// Returns `false` if the dialog is not open (already closing, removed,
    /// or never queued); a closing dialog is never reopened.
    pub fn request_close(&self, id: DialogId) -> bool {
        if !self.is_mounted() {
            return false;
        }

        let mut state = lock(&self.state);
        if !state.contains(id) || state.closing.contains_key(&id) {
            return false;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            // No event loop to defer onto: skip the animation
            tracing::warn!(dialog_id = %id, "No tokio runtime, removing dialog immediately");
            drop(state);
            remove_from(&self.store, id);
            return true;
        };

        let store = self.store.clone();
        let grace = self.grace;
        let timer = runtime.spawn(async move {
            tokio::time::sleep(grace).await;
            remove_from(&store, id);
        });
        // Inserted under the same lock the listener takes, so even a zero
        // grace period cannot prune before the entry exists.
        state.closing.insert(id, timer.abort_handle());

        tracing::debug!(dialog_id = %id, grace_ms = grace.as_millis() as u64, "Dialog closing");
        true
    }

    /// Resolver of a queued confirm dialog, taken before closing it
    ///
    /// Closing can remove the record synchronously (no runtime) or on another
    /// worker (zero grace), so the resolver must be in hand first.
    fn resolver_of(&self, id: DialogId) -> Option<ConfirmResolver> {
        lock(&self.state)
            .dialogs
            .iter()
            .find(|d| d.id == id)
            .and_then(|d| d.kind.resolver().cloned())
    }

    fn answer(&self, id: DialogId, value: bool) -> bool {
        let resolver = self.resolver_of(id);
        self.request_close(id);
        match resolver {
            Some(resolver) => {
                let delivered = resolver.resolve(value);
                if delivered {
                    tracing::info!(dialog_id = %id, value, "Confirm dialog answered");
                }
                delivered
            }
            None => false,
        }
    }

    /// Close a confirm dialog and resolve it with `true`
    ///
    /// Returns whether this call delivered the answer.
    pub fn accept(&self, id: DialogId) -> bool {
        self.answer(id, true)
    }

    /// Close a confirm dialog and resolve it with `false`
    pub fn decline(&self, id: DialogId) -> bool {
        self.answer(id, false)
    }

    /// Close any dialog; an unanswered confirm resolves to `false`
    pub fn dismiss(&self, id: DialogId) -> bool {
        let resolver = self.resolver_of(id);
        let closed = self.request_close(id);
        if let Some(resolver) = resolver {
            resolver.resolve(false);
        }
        closed
    }

    /// Route a key to the focused dialog's widget and apply its action
    ///
    /// Returns the dialog and action taken, or `None` if there is no open
    /// dialog or the widget ignored the key.
    pub fn handle_key(&self, key: KeyEvent) -> Option<(DialogId, WidgetAction)> {
        let focused = self.focused()?;
        let action = widget_for(&focused.kind).handle_key(key);
        match action {
            WidgetAction::None => return None,
            WidgetAction::Accept => {
                self.accept(focused.id);
            }
            WidgetAction::Decline => {
                self.decline(focused.id);
            }
            WidgetAction::Close => {
                self.dismiss(focused.id);
            }
        }
        Some((focused.id, action))
    }
}

impl Drop for DialogRoot {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn remove_from(store: &DialogStore, id: DialogId) {
    store.update(|list| list.into_iter().filter(|d| d.id != id).collect());
    tracing::debug!(dialog_id = %id, "Dialog removed");
}
