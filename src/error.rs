//! Error types for `fisherman`.

use std::path::PathBuf;

/// Errors that can occur while managing the pre-commit hook.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The project config file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The working directory is not inside a git repository.
    #[error("This is not a Git repository")]
    NotARepository,

    /// The git hooks directory could not be determined.
    #[error("Could not resolve the Git hooks directory: {0}")]
    HooksDirUnresolvable(String),

    /// There is no hook file to operate on.
    #[error("No pre-commit hook found at {}", .0.display())]
    NoHookFile(PathBuf),

    /// The file given as new hook content could not be read.
    #[error("Cannot read hook source {}: {source}", path.display())]
    HookSource {
        /// The source file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The hook does not start with the `#!/bin/sh` line.
    #[error("No valid shebang found; the hook must start with '#!/bin/sh'")]
    NoShebang,

    /// A shorthand duration could not be parsed.
    #[error("Invalid duration format '{input}': {reason}")]
    InvalidDuration {
        /// The string that was given.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A duration that would disable the hook until a moment in the past.
    #[error("Duration '{0}' is negative; expected something like '1h' or '2d'")]
    NegativeDuration(String),

    /// A disable block in the hook is damaged and cannot be rewritten safely.
    #[error("Malformed disable block at line {line}: {reason}")]
    MalformedBlock {
        /// 1-based line number where the block starts.
        line: usize,
        /// What is wrong with the block.
        reason: &'static str,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
