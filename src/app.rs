//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command
//! handlers.

use crate::commands;
use crate::logging;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::process;

/// A terminal control panel for the focusrec productivity recorder
#[derive(Parser)]
#[command(name = "focusrec")]
#[command(version)]
#[command(about = "Terminal control panel for the focusrec productivity recorder")]
#[command(
    long_about = "Terminal control panel for the focusrec productivity recorder.\n\n\
The panel shows recording status, elapsed duration, and session identity,\n\
and forwards start/pause/resume/stop to the native recorder backend.\n\n\
DEFAULT COMMAND:\n    If no command is specified, 'panel' is used by default.\n\n\
EXAMPLES:\n    # Open the control panel\n    $ focusrec\n\n    \
# Toggle recording from a script or hotkey daemon\n    $ pkill -USR1 focusrec\n\n    \
# Edit configuration file\n    $ focusrec config\n\n    \
# Show recent log entries\n    $ focusrec logs"
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/focusrec/focusrec.toml\n    Logs:               ~/.local/state/focusrec/focusrec.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the recording control panel (default)
    ///
    /// Press 's' to start, Space to pause/resume, 'x' to stop,
    /// Escape/q to leave the panel.
    #[command(visible_alias = "p")]
    Panel,

    /// Open configuration file in your preferred editor
    ///
    /// Edit the recorder backend command and panel options.
    /// Uses $EDITOR environment variable or falls back to nano/vim.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    /// Useful for troubleshooting issues.
    Logs,

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    ///
    /// Examples:
    ///   focusrec completions bash > focusrec.bash
    ///   focusrec completions zsh > _focusrec
    ///   focusrec completions fish > focusrec.fish
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails (e.g., configuration, panel loop)
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "focusrec", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs) => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    // Initialize logging for all other commands
    logging::init_logging()?;

    // Route to appropriate command handler
    match cli.command {
        None | Some(Commands::Panel) => {
            commands::handle_panel().await?;
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. }) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
