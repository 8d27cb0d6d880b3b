//! Command-line interface for fisherman.
//!
//! The binary only parses arguments and prints; everything else lives here so
//! it can be tested without spawning a process.

mod run;

#[cfg(test)]
mod tests;

pub use run::{run, run_in, CliOutput};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fisherman - switch a Git pre-commit hook on and off.
///
/// Disabling never deletes the hook: a short early-exit block is inserted
/// after the shebang line and removed again by `enable`.
#[derive(Parser, Debug)]
#[command(name = "fisherman")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print debug diagnostics (same as FISHERMAN_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enable the pre-commit hook.
    ///
    /// Without --file, removes any disable block from the existing hook.
    /// With --file, installs that file's content as the hook.
    Enable {
        /// File containing the pre-commit hook script
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Disable the pre-commit hook until it is enabled again.
    Disable,

    /// Disable the pre-commit hook for a while, e.g. `30m`, `2h`, `1d`, `1w`.
    #[command(name = "disable-for")]
    DisableFor {
        /// How long to disable for: an integer followed by s, m, h, d or w
        #[arg(allow_hyphen_values = true)]
        duration: String,
    },

    /// Show whether the pre-commit hook is enabled.
    Status,

    /// Show version information.
    Version,
}

impl Command {
    /// Returns true if the command operates on the repository's hook.
    #[must_use]
    pub const fn needs_repository(&self) -> bool {
        !matches!(self, Self::Version)
    }

    /// Prefix for error messages raised while running the command.
    #[must_use]
    pub const fn failure_context(&self) -> &'static str {
        match self {
            Self::Enable { .. } => "Error enabling pre-commit hook",
            Self::Disable => "Error disabling pre-commit hook",
            Self::DisableFor { .. } => "Error temporarily disabling pre-commit hook",
            Self::Status => "Error reading pre-commit hook",
            Self::Version => "Error",
        }
    }
}
