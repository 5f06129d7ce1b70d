//! Demo application state
//!
//! A background screen that opens dialogs through the imperative API and
//! logs every confirm answer, with one mounted [`DialogRoot`].

mod keyboard;

use crate::action::Action;
use crate::event::Event;
use dialog_queue::{DialogController, DialogOptions, DialogQueueConfig, DialogRoot, DialogStore};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Maximum answers kept in the result log
pub const MAX_RESULTS: usize = 50;

/// How long a footer status message stays up
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

const CONFIRM_CONTENT: &str = "Do you want to continue? Your answer is printed in the result log.";
const NORMAL_CONTENT: &str = "This dialog has no result. Close it with Enter or Esc.";

/// Application state and logic
pub struct App {
    pub config: DialogQueueConfig,
    pub dialogs: DialogController,
    pub root: DialogRoot,
    /// Newest first
    pub results: VecDeque<String>,
    pub should_quit: bool,
    pub show_help: bool,
    /// Dirty flag: true if UI needs re-render (render-on-change optimization)
    pub needs_render: bool,
    /// Status message to display in footer (message, timestamp)
    pub status_message: Option<(String, Instant)>,
    /// Counter used to number dialog titles
    opened: usize,
    event_tx: mpsc::Sender<Event>,
}

impl App {
    pub fn new(config: DialogQueueConfig, event_tx: mpsc::Sender<Event>) -> Self {
        let store = DialogStore::create();

        // Wake the main loop whenever the queue changes (including deferred
        // removals, which happen off the key path)
        let wake_tx = event_tx.clone();
        let root = DialogRoot::mount_with_listener(store.clone(), &config.dialogs, move |_| {
            if let Err(e) = wake_tx.try_send(Event::DialogsChanged) {
                // Full channel already holds a wake-up; closed means shutdown
                tracing::trace!(error = %e, "Dialog wake-up not delivered");
            }
        });

        Self {
            config,
            dialogs: DialogController::new(store),
            root,
            results: VecDeque::new(),
            should_quit: false,
            show_help: false,
            needs_render: true, // Always render first frame
            status_message: None,
            opened: 0,
            event_tx,
        }
    }

    /// Show a status message in the footer (clears after 5 seconds)
    pub fn show_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
        self.needs_render = true;
    }

    /// Handle incoming events
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                self.handle_key(key);
                self.needs_render = true;
            }
            Event::DialogsChanged => {
                self.needs_render = true;
            }
            Event::ConfirmResolved { id, title, value } => {
                tracing::info!(dialog_id = %id, value, "Confirm answer received");
                self.results.push_front(format!("{title}: {value}"));
                self.results.truncate(MAX_RESULTS);
                self.needs_render = true;
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::OpenConfirm => self.open_confirm(),
            Action::OpenNormal => self.open_normal(),
            Action::OpenBurst => {
                self.open_confirm();
                self.open_confirm();
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ClearResults => {
                self.results.clear();
                self.show_status("Result log cleared");
            }
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
        if action.should_render() {
            self.needs_render = true;
        }
    }

    fn next_title(&mut self, prefix: &str) -> String {
        self.opened += 1;
        format!("{prefix} #{}", self.opened)
    }

    /// Queue a confirm dialog and report its answer back through the event channel
    fn open_confirm(&mut self) {
        let title = self.next_title("Confirm");
        let handle = self
            .dialogs
            .confirm(DialogOptions::new(title.clone(), CONFIRM_CONTENT));
        let id = handle.id();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let value = handle.await;
            if tx
                .send(Event::ConfirmResolved { id, title, value })
                .await
                .is_err()
            {
                tracing::debug!(dialog_id = %id, "App gone before confirm answer arrived");
            }
        });
    }

    fn open_normal(&mut self) {
        let title = self.next_title("Notice");
        self.dialogs.normal(DialogOptions::new(title, NORMAL_CONTENT));
    }

    /// Periodic tick: expire status messages, keep closing dialogs animating
    pub fn tick(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.needs_render = true;
            }
        }
        if self.root.entries().iter().any(|e| !e.visible) {
            self.needs_render = true;
        }
    }

    /// Called after render to reset dirty flag
    pub fn rendered(&mut self) {
        self.needs_render = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use dialog_queue::DialogPhase;

    fn app() -> (App, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(100);
        (App::new(DialogQueueConfig::default(), tx), rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_event_channel_does_not_block_dialogs() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut app = App::new(DialogQueueConfig::default(), tx);

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.root.open_count(), 3);
        // Only one wake-up fits; the rest are dropped
        assert!(matches!(rx.try_recv(), Ok(Event::DialogsChanged)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_answer_reaches_result_log() {
        let (mut app, mut rx) = app();

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.root.open_count(), 1);

        press(&mut app, KeyCode::Char('y'));

        // DialogsChanged events first, then the answer
        loop {
            let event = rx.recv().await.unwrap();
            let done = matches!(event, Event::ConfirmResolved { .. });
            app.handle_event(event);
            if done {
                break;
            }
        }
        assert_eq!(app.results.front().map(String::as_str), Some("Confirm #1: true"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_normal_dialog_closes_and_is_removed() {
        let (mut app, _rx) = app();

        press(&mut app, KeyCode::Char('n'));
        let id = app.root.focused().unwrap().id;
        assert_eq!(app.root.phase(id), DialogPhase::Open);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.root.phase(id), DialogPhase::Closing);

        tokio::time::sleep(app.config.dialogs.grace_period() + Duration::from_millis(1)).await;
        assert_eq!(app.root.phase(id), DialogPhase::Removed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_go_to_dialog_before_screen() {
        let (mut app, _rx) = app();

        press(&mut app, KeyCode::Char('c'));
        // 'n' declines the open confirm instead of opening a notice
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.root.open_count(), 0);
        assert_eq!(app.dialogs.store().len(), 1);

        // Esc with no open dialog quits
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_opens_two_independent_confirms() {
        let (mut app, _rx) = app();
        app.dispatch(Action::OpenBurst);

        let dialogs = app.root.dialogs();
        assert_eq!(dialogs.len(), 2);
        assert_ne!(dialogs[0].id, dialogs[1].id);
        assert_eq!(dialogs[1].title, "Confirm #2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_results() {
        let (mut app, _rx) = app();
        app.results.push_front("old".to_string());
        app.dispatch(Action::ClearResults);
        assert!(app.results.is_empty());
        assert!(app.status_message.is_some());
    }
}
