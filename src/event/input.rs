use super::Event;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Forward key presses to the app until cancelled or the channel closes
pub async fn listen(tx: mpsc::Sender<Event>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Input listener cancelled");
                break;
            }
            () = tokio::time::sleep(Duration::from_millis(50)) => {
                // Drain everything already buffered so fast typing isn't throttled
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    match event::read() {
                        // Release/repeat events would answer a dialog twice on some terminals
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx.send(Event::Key(key)).await.is_err() {
                                return;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read terminal event");
                            break;
                        }
                    }
                }
            }
        }
    }
}
