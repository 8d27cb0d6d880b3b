//! Abstractions over the outside world, so git queries can be mocked.

use crate::error::Result;
use std::path::Path;

/// Output from a command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// The exit code of the command.
    pub exit_code: i32,
    /// The stdout output.
    pub stdout: String,
    /// The stderr output.
    pub stderr: String,
}

impl CommandOutput {
    /// Check if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout with surrounding whitespace removed, or `None` if that leaves nothing.
    #[must_use]
    pub fn trimmed_stdout(&self) -> Option<&str> {
        let out = self.stdout.trim();
        (!out.is_empty()).then_some(out)
    }
}

/// Trait for running external programs.
pub trait CommandRunner {
    /// Run `program` with `args` inside `cwd`.
    ///
    /// A non-zero exit is reported through [`CommandOutput::exit_code`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;

    /// Check if a program is available in PATH.
    fn is_available(&self, program: &str) -> bool;
}
