#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

//! dialog-queue demo - terminal UI over the dialog queue
//!
//! Opens confirm and normal dialogs through the imperative API and logs each
//! confirm answer, the way an application would await it.
//!
//! Usage:
//!   dialog-queue                    # Start the TUI
//!   dialog-queue example-config     # Print a sample config file

mod action;
mod app;
mod cli;
mod event;
mod screen;
mod tui;

use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::Result;
use dialog_queue::DialogQueueConfig;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the log directory path
fn get_log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("/tmp/dialog-queue/logs"),
        |dirs| dirs.cache_dir().join("dialog-queue").join("logs"),
    )
}

/// Resolve config: an explicit path must parse, the default path may be absent
fn load_config(cli: &Cli) -> Result<DialogQueueConfig> {
    let mut config = match &cli.config {
        Some(path) => DialogQueueConfig::try_load_from_path(path)?,
        None => DialogQueueConfig::load(),
    };
    if let Some(grace) = cli.close_grace_ms {
        tracing::debug!(close_grace_ms = grace, "Grace period overridden from CLI");
        config.dialogs.close_grace_ms = grace;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::ExampleConfig) => {
            print!("{}", DialogQueueConfig::example());
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            cli::print_completions(*shell);
            return Ok(());
        }
        None => {
            // TUI mode: continue with full setup
        }
    }

    // Initialize error handling
    color_eyre::install()?;

    // The TUI owns the terminal, so logs go to a rotating file
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "dialog-queue.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let log_filter = format!("dialog_queue={}", cli.log_level);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(non_blocking),
        )
        .init();

    tracing::info!("Starting dialog-queue v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {:?}", log_dir);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "Configuration resolved");

    run_tui(config, cli.tick_rate, cli.frame_rate).await
}

async fn run_tui(config: DialogQueueConfig, tick_rate: f64, frame_rate: f64) -> Result<()> {
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    let tick_duration = Duration::from_secs_f64(1.0 / tick_rate.max(0.1));
    let frame_duration = Duration::from_secs_f64(1.0 / frame_rate.max(1.0));

    tracing::info!(
        "TUI starting: {:.1} FPS, {:.1} ticks/sec",
        frame_rate,
        tick_rate
    );

    let (event_tx, mut event_rx) = mpsc::channel(100);

    let mut terminal = tui::init()?;

    // RAII guard ensures terminal is restored on panic or early return
    let _guard = tui::TerminalGuard;

    let mut app = App::new(config, event_tx.clone());

    let cancel = CancellationToken::new();
    let input_cancel = cancel.clone();
    let input_handle = tokio::spawn(event::input::listen(event_tx, input_cancel));

    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        if app.needs_render && now.duration_since(last_frame) >= frame_duration {
            terminal.draw(|f| screen::render(f, &app))?;
            app.rendered();
            last_frame = now;
        }

        tokio::select! {
            Some(event) = event_rx.recv() => {
                app.handle_event(event);
            }
            () = tokio::time::sleep(tick_duration) => {
                app.tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::debug!(
        pending = app.dialogs.store().len(),
        "Shutting down, unanswered dialogs resolve to false"
    );
    cancel.cancel();
    input_handle.abort();

    // Unmount first so no removal timer fires into a disposed store
    app.root.unmount();
    app.dialogs.store().dispose();

    tui::restore()?;
    terminal.show_cursor()?;

    Ok(())
}
