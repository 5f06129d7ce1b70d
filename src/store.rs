//! Dialog queue store
//!
//! The single source of truth for which dialogs exist right now. The list is
//! only ever replaced as a whole: callers compute the next list from the
//! previous one (map/filter/append) and install it with [`DialogStore::update`]
//! or [`DialogStore::set_all`], which notify every subscriber before returning.
//!
//! Installs are atomic under the store lock; notification is not. Only one
//! notification round runs at a time, so an install made from inside a
//! listener, or racing in from another thread, is delivered by the round
//! already running rather than by its own caller.
//!
//! A store is an explicit object rather than a process-wide singleton, so
//! independent stores (one per app, one per test) never see each other.

use crate::dialog::DialogRecord;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with the new list on every [`DialogStore::set_all`]
pub type Listener = Arc<dyn Fn(&[DialogRecord]) + Send + Sync>;

/// Handle returned by [`DialogStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Default)]
struct Inner {
    value: Vec<DialogRecord>,
    /// Keyed by monotonic id, so iteration order is registration order
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
    /// Bumped on every install
    generation: u64,
    /// Generation most recently handed to listeners
    delivered: u64,
    /// A notification round is running somewhere
    delivering: bool,
}

/// Clears the delivering flag if a listener panics mid-round
struct DeliveryReset<'a>(&'a DialogStore);

impl Drop for DeliveryReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().delivering = false;
        }
    }
}

/// Observable, whole-list-replacement store of dialog records
///
/// Cloning the store clones the handle; all clones share one list.
#[derive(Clone, Default)]
pub struct DialogStore {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for DialogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("DialogStore")
            .field("dialogs", &inner.value.len())
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

impl DialogStore {
    /// Create an empty store with no subscribers
    pub fn create() -> Self {
        Self::default()
    }

    // Listeners never run under the lock and `update` computes the next list
    // before assigning it, so a panic cannot leave the list half-written.
    // Recovering from poison is safe.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current snapshot, in insertion order
    pub fn get_all(&self) -> Vec<DialogRecord> {
        self.lock().value.clone()
    }

    /// Number of queued records
    pub fn len(&self) -> usize {
        self.lock().value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().value.is_empty()
    }

    /// Replace the whole list and notify every subscriber synchronously
    ///
    /// Subscribers are called in registration order, after the lock is
    /// released, so a listener may call [`get_all`](Self::get_all) or even
    /// `set_all` again without deadlocking. A nested call returns at once and
    /// its list is delivered right after the current one.
    pub fn set_all(&self, next: Vec<DialogRecord>) {
        self.install(|_| next);
    }

    /// Compute the next list from the current one and install it atomically
    ///
    /// `f` runs under the store lock, so no other install can land between
    /// the read and the write. It must not call back into the store.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Vec<DialogRecord>) -> Vec<DialogRecord>,
    {
        self.install(f);
    }

    fn install<F>(&self, f: F)
    where
        F: FnOnce(Vec<DialogRecord>) -> Vec<DialogRecord>,
    {
        {
            let mut inner = self.lock();
            let next = f(inner.value.clone());
            inner.value = next;
            inner.generation += 1;
            if inner.delivering {
                // The running round (a listener up the stack, or another
                // thread) picks this generation up before it finishes
                return;
            }
            inner.delivering = true;
        }
        self.deliver();
    }

    /// Notify listeners until they have seen the latest generation
    ///
    /// Only one round runs at a time, so every listener sees lists in
    /// install order and the last list it sees is the current one. Installs
    /// racing in from other threads may be coalesced into one notification.
    fn deliver(&self) {
        let _reset = DeliveryReset(self);
        loop {
            let (snapshot, listeners) = {
                let mut inner = self.lock();
                if inner.delivered == inner.generation {
                    inner.delivering = false;
                    return;
                }
                inner.delivered = inner.generation;
                let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
                (inner.value.clone(), listeners)
            };

            tracing::trace!(
                dialogs = snapshot.len(),
                subscribers = listeners.len(),
                "Dialog list replaced"
            );

            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    /// Register a listener invoked on every `set_all`
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[DialogRecord]) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.insert(id, Arc::new(listener));
        tracing::debug!(subscription = %id, "Store subscriber added");
        id
    }

    /// Remove a listener; no-op if it is already gone
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.lock().listeners.remove(&id).is_some() {
            tracing::debug!(subscription = %id, "Store subscriber removed");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Tear the store down: drop every subscriber and every queued record
    ///
    /// Dropping the records drops their confirm resolvers, so pending
    /// [`ConfirmHandle`](crate::controller::ConfirmHandle)s resolve to `false`.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        let dropped = inner.value.len();
        inner.listeners.clear();
        inner.value.clear();
        inner.delivered = inner.generation;
        tracing::debug!(dropped, "Dialog store disposed");
    }
}
