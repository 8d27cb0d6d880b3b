//! # `fisherman`
//!
//! Switch a Git `pre-commit` hook off and on again without losing it.
//!
//! Disabling inserts a small early-exit block after the hook's `#!/bin/sh`
//! line, either permanently or until a point in time; enabling removes it.

#[cfg(feature = "cli")]
pub mod cli;
pub mod command;
pub mod config;
pub mod duration;
pub mod error;
pub mod git;
pub mod hook_file;
pub mod logger;
pub mod marker;
pub mod testing;
pub mod traits;

pub use command::RealCommandRunner;
pub use duration::{parse_duration, ShorthandDuration};
pub use error::{Error, Result};
pub use hook_file::{disable, disable_for, enable, status, HookStatus, Outcome};
pub use marker::{DisableBlock, HookScript};
pub use traits::{CommandOutput, CommandRunner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
