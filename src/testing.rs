//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit tests.

#![allow(dead_code)]
#![allow(clippy::needless_pass_by_ref_mut)] // &mut self for ergonomics with RefCell

use crate::error::Result;
use crate::traits::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::path::Path;

/// A mock command runner for testing.
///
/// Records expected commands and their outputs, then verifies they were called
/// in order.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    expectations: RefCell<Vec<(String, Vec<String>, CommandOutput)>>,
    call_index: RefCell<usize>,
}

impl MockCommandRunner {
    /// Create a new mock command runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected command and its output.
    pub fn expect(&mut self, program: &str, args: &[&str], output: CommandOutput) {
        self.expectations.borrow_mut().push((
            program.to_string(),
            args.iter().map(|s| (*s).to_string()).collect(),
            output,
        ));
    }

    /// Expect a git command that succeeds with the given stdout.
    pub fn expect_git(&mut self, args: &[&str], stdout: &str) {
        self.expect(
            "git",
            args,
            CommandOutput { exit_code: 0, stdout: stdout.to_string(), stderr: String::new() },
        );
    }

    /// Expect a git command that fails with the given exit code.
    pub fn expect_git_failure(&mut self, args: &[&str], exit_code: i32) {
        self.expect(
            "git",
            args,
            CommandOutput { exit_code, stdout: String::new(), stderr: "fatal".to_string() },
        );
    }

    /// Verify all expected commands were called.
    ///
    /// # Panics
    ///
    /// Panics if not all expected commands were called.
    pub fn verify(&self) {
        let index = *self.call_index.borrow();
        let expected = self.expectations.borrow().len();
        assert_eq!(
            index, expected,
            "Expected {expected} command calls, but only {index} were made"
        );
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
        let mut index = self.call_index.borrow_mut();
        let expectations = self.expectations.borrow();

        assert!(
            *index < expectations.len(),
            "Unexpected command call: {program} {args:?} (no more expectations)"
        );

        let (exp_program, exp_args, output) = &expectations[*index];
        let args_vec: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();

        assert!(
            program == exp_program && &args_vec == exp_args,
            "Command mismatch at index {}:\n  Expected: {} {:?}\n  Got: {} {:?}",
            *index,
            exp_program,
            exp_args,
            program,
            args
        );

        *index += 1;
        Ok(output.clone())
    }

    /// Lookups go through expectations, so no program is on the path.
    fn is_available(&self, _program: &str) -> bool {
        false
    }
}
