//! Dialog records and their kind-specific payloads

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Opaque identifier of a queued dialog, stable for the record's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(Uuid);

impl DialogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Single-use completion function for a confirm dialog
///
/// Clones share the same underlying sender. The first [`resolve`](Self::resolve)
/// delivers the answer; every later call is a logged no-op.
#[derive(Clone)]
pub struct ConfirmResolver {
    sender: Arc<Mutex<Option<oneshot::Sender<bool>>>>,
}

impl ConfirmResolver {
    pub(crate) fn new(sender: oneshot::Sender<bool>) -> Self {
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    /// Deliver the answer. Returns `false` if it was already resolved.
    pub fn resolve(&self, value: bool) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match sender {
            Some(tx) => {
                if tx.send(value).is_err() {
                    // Caller dropped its handle; the answer has nowhere to go
                    tracing::debug!(value, "Confirm result discarded, handle dropped");
                }
                true
            }
            None => {
                tracing::warn!(value, "Confirm dialog resolved more than once, ignoring");
                false
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl fmt::Debug for ConfirmResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmResolver")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Kind tag plus the payload that kind carries
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// Blocking yes/no question; the resolver completes the caller's future
    Confirm(ConfirmResolver),
    /// Informational message with no result
    Normal,
}

impl DialogKind {
    pub fn label(&self) -> &'static str {
        match self {
            DialogKind::Confirm(_) => "confirm",
            DialogKind::Normal => "normal",
        }
    }

    pub fn resolver(&self) -> Option<&ConfirmResolver> {
        match self {
            DialogKind::Confirm(resolver) => Some(resolver),
            DialogKind::Normal => None,
        }
    }
}

/// One queued dialog
///
/// Visibility is not stored here: the dialog root keeps a side-table of
/// closing ids, so closing never clones or rewrites records.
#[derive(Debug, Clone)]
pub struct DialogRecord {
    pub id: DialogId,
    pub title: String,
    pub content: String,
    pub kind: DialogKind,
}

impl DialogRecord {
    /// Build a record with a fresh id
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: DialogKind) -> Self {
        Self {
            id: DialogId::new(),
            title: title.into(),
            content: content.into(),
            kind,
        }
    }
}

/// Lifecycle of a record as seen by a dialog root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    /// In the list and interactive
    Open,
    /// Close requested; still in the list while the close animation plays
    Closing,
    /// No longer in the list
    Removed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<DialogId> = (0..1000).map(|_| DialogId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_resolver_first_call_wins() {
        let (tx, mut rx) = oneshot::channel();
        let resolver = ConfirmResolver::new(tx);

        assert!(!resolver.is_resolved());
        assert!(resolver.resolve(true));
        assert!(resolver.is_resolved());
        assert!(!resolver.resolve(false));

        assert_eq!(rx.try_recv().unwrap(), true);
    }

    #[test]
    fn test_resolver_clones_share_state() {
        let (tx, mut rx) = oneshot::channel();
        let resolver = ConfirmResolver::new(tx);
        let clone = resolver.clone();

        assert!(clone.resolve(false));
        assert!(!resolver.resolve(true));
        assert_eq!(rx.try_recv().unwrap(), false);
    }

    #[test]
    fn test_resolve_after_receiver_dropped() {
        let (tx, rx) = oneshot::channel();
        let resolver = ConfirmResolver::new(tx);
        drop(rx);
        assert!(resolver.resolve(true));
        assert!(resolver.is_resolved());
    }

    #[test]
    fn test_kind_labels() {
        let (tx, _rx) = oneshot::channel();
        assert_eq!(DialogKind::Confirm(ConfirmResolver::new(tx)).label(), "confirm");
        assert_eq!(DialogKind::Normal.label(), "normal");
        assert!(DialogKind::Normal.resolver().is_none());
    }
}
