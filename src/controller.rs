//! Imperative dialog API
//!
//! Any part of the app holding a [`DialogController`] can queue a dialog
//! without owning any widget state. Records are appended to the store; a
//! mounted [`DialogRoot`](crate::root::DialogRoot) renders them. Queuing with
//! no root mounted is allowed: the records wait until one subscribes.

use crate::dialog::{ConfirmResolver, DialogId, DialogKind, DialogRecord};
use crate::store::DialogStore;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Caller-supplied dialog content
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    pub title: String,
    pub content: String,
}

impl DialogOptions {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Pending answer of a confirm dialog
///
/// Resolves to `true` on accept and `false` on decline or dismiss. If the
/// record is discarded without an answer (e.g. the store is disposed) it
/// resolves to `false`.
#[derive(Debug)]
#[must_use = "a confirm dialog's answer is only observable through its handle"]
pub struct ConfirmHandle {
    id: DialogId,
    rx: oneshot::Receiver<bool>,
}

impl ConfirmHandle {
    /// Id of the queued record this handle belongs to
    pub fn id(&self) -> DialogId {
        self.id
    }

    /// Non-blocking check, for callers that poll from a render loop
    ///
    /// Returns `None` while the dialog is unanswered. Once this returns
    /// `Some`, the handle is spent and must not be awaited.
    pub fn try_result(&mut self) -> Option<bool> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(false),
        }
    }
}

impl Future for ConfirmHandle {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(false))
    }
}

/// Entry point for queuing dialogs
#[derive(Debug, Clone)]
pub struct DialogController {
    store: DialogStore,
}

impl DialogController {
    pub fn new(store: DialogStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DialogStore {
        &self.store
    }

    /// Queue a confirm dialog and return its pending answer
    ///
    /// Returns immediately; await the handle to get the decision.
    pub fn confirm(&self, options: DialogOptions) -> ConfirmHandle {
        // Both halves exist before the record is built, so a record can
        // never be queued without a way to answer it.
        let (tx, rx) = oneshot::channel();
        let record = DialogRecord::new(
            options.title,
            options.content,
            DialogKind::Confirm(ConfirmResolver::new(tx)),
        );
        let id = record.id;
        self.enqueue(record);
        ConfirmHandle { id, rx }
    }

    /// Queue an informational dialog (fire-and-forget)
    pub fn normal(&self, options: DialogOptions) -> DialogId {
        let record = DialogRecord::new(options.title, options.content, DialogKind::Normal);
        let id = record.id;
        self.enqueue(record);
        id
    }

    fn enqueue(&self, record: DialogRecord) {
        tracing::info!(
            dialog_id = %record.id,
            kind = record.kind.label(),
            title = %record.title,
            "Dialog queued"
        );
        if self.store.subscriber_count() == 0 {
            tracing::debug!(dialog_id = %record.id, "No dialog root mounted, dialog waits");
        }
        self.store.update(|mut list| {
            list.push(record);
            list
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn controller() -> DialogController {
        DialogController::new(DialogStore::create())
    }

    #[test]
    fn test_normal_appends_record() {
        let ctl = controller();
        let id = ctl.normal(DialogOptions::new("T", "C"));

        let all = ctl.store().get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].title, "T");
        assert_eq!(all[0].content, "C");
        assert!(matches!(all[0].kind, DialogKind::Normal));
    }

    #[test]
    fn test_confirm_appends_record_with_resolver() {
        let ctl = controller();
        let handle = ctl.confirm(DialogOptions::new("Q", "Are you sure?"));

        let all = ctl.store().get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, handle.id());
        let resolver = all[0].kind.resolver().expect("confirm record has a resolver");
        assert!(!resolver.is_resolved());
    }

    #[test]
    fn test_ids_distinct_across_calls() {
        let ctl = controller();
        let mut ids = HashSet::new();
        for i in 0..50 {
            if i % 2 == 0 {
                ids.insert(ctl.normal(DialogOptions::new("n", "")));
            } else {
                ids.insert(ctl.confirm(DialogOptions::new("c", "")).id());
            }
        }
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let ctl = controller();
        let a = ctl.normal(DialogOptions::new("a", ""));
        let b = ctl.confirm(DialogOptions::new("b", "")).id();
        let c = ctl.normal(DialogOptions::new("c", ""));

        let order: Vec<DialogId> = ctl.store().get_all().iter().map(|d| d.id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_resolving_record_completes_handle() {
        let ctl = controller();
        let handle = ctl.confirm(DialogOptions::new("Q", ""));

        let record = ctl.store().get_all().remove(0);
        record.kind.resolver().unwrap().resolve(true);

        assert!(handle.await);
    }

    #[tokio::test]
    async fn test_two_confirms_are_independent() {
        let ctl = controller();
        let mut first = ctl.confirm(DialogOptions::new("one", ""));
        let second = ctl.confirm(DialogOptions::new("two", ""));

        let all = ctl.store().get_all();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);

        all[1].kind.resolver().unwrap().resolve(false);
        assert!(!second.await);
        assert_eq!(first.try_result(), None);
    }

    #[tokio::test]
    async fn test_dispose_resolves_pending_to_false() {
        let ctl = controller();
        let handle = ctl.confirm(DialogOptions::new("Q", ""));

        ctl.store().dispose();

        assert!(!handle.await);
    }

    #[test]
    fn test_try_result_after_answer() {
        let ctl = controller();
        let mut handle = ctl.confirm(DialogOptions::new("Q", ""));
        assert_eq!(handle.try_result(), None);

        ctl.store().get_all()[0].kind.resolver().unwrap().resolve(true);
        assert_eq!(handle.try_result(), Some(true));
    }
}
