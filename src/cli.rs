//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Imperative confirm/normal dialogs over an observable queue - terminal demo
#[derive(Parser, Debug)]
#[command(name = "dialog-queue")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/dialog-queue/config.toml)
    #[arg(short, long, env = "DIALOG_QUEUE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the close grace period from the config file (milliseconds)
    #[arg(short = 'g', long, global = true)]
    pub close_grace_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Tick rate in ticks per second (default: 4.0)
    #[arg(short = 't', long, default_value_t = 4.0, global = true)]
    pub tick_rate: f64,

    /// Frame rate in frames per second (default: 30.0)
    #[arg(short = 'F', long, default_value_t = 30.0, global = true)]
    pub frame_rate: f64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an example config file
    ExampleConfig,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "dialog-queue", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grace_override_parses() {
        let cli = Cli::try_parse_from(["dialog-queue", "--close-grace-ms", "250"]).unwrap();
        assert_eq!(cli.close_grace_ms, Some(250));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_example_config_subcommand() {
        let cli = Cli::try_parse_from(["dialog-queue", "example-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ExampleConfig)));
    }
}
