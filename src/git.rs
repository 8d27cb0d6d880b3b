//! Git repository queries.
//!
//! Only two questions are asked of git: whether we are inside a repository,
//! and where its hooks live.

use crate::error::{Error, Result};
use crate::traits::CommandRunner;
use std::path::{Path, PathBuf};

/// File name of the managed hook.
pub const PRE_COMMIT: &str = "pre-commit";

/// Check if `base_dir` is inside a git repository.
pub fn is_git_repo(runner: &dyn CommandRunner, base_dir: &Path) -> bool {
    runner
        .run("git", &["rev-parse", "--git-dir"], base_dir)
        .map(|o| o.success())
        .unwrap_or(false)
}

/// Get the repository's git directory, absolute.
///
/// # Errors
///
/// Returns [`Error::NotARepository`] if git does not report one.
pub fn git_dir(runner: &dyn CommandRunner, base_dir: &Path) -> Result<PathBuf> {
    let output = runner.run("git", &["rev-parse", "--git-dir"], base_dir)?;
    match output.trimmed_stdout() {
        Some(dir) if output.success() => Ok(base_dir.join(dir)),
        _ => Err(Error::NotARepository),
    }
}

/// Get the top level of the working tree, if there is one (bare repositories
/// have none).
///
/// # Errors
///
/// Returns an error if git cannot be run.
pub fn top_level(runner: &dyn CommandRunner, base_dir: &Path) -> Result<Option<PathBuf>> {
    let output = runner.run("git", &["rev-parse", "--show-toplevel"], base_dir)?;
    if output.success() {
        Ok(output.trimmed_stdout().map(PathBuf::from))
    } else {
        Ok(None)
    }
}

/// Read `core.hooksPath`, with `~` expanded by git.
///
/// # Errors
///
/// Returns an error if git cannot be run.
pub fn configured_hooks_path(runner: &dyn CommandRunner, base_dir: &Path) -> Result<Option<String>> {
    let output = runner.run("git", &["config", "--path", "--get", "core.hooksPath"], base_dir)?;
    // Exit code 1 just means the key is unset.
    if output.success() {
        Ok(output.trimmed_stdout().map(str::to_string))
    } else {
        Ok(None)
    }
}

/// Resolve the directory git runs hooks from.
///
/// Honours `core.hooksPath` (relative values are taken from the top of the
/// working tree, like git does), otherwise `<git-dir>/hooks`.
///
/// # Errors
///
/// Returns [`Error::HooksDirUnresolvable`] if the directory does not exist,
/// or [`Error::NotARepository`] if there is no git directory.
pub fn hooks_dir(runner: &dyn CommandRunner, base_dir: &Path) -> Result<PathBuf> {
    let dir = if let Some(configured) = configured_hooks_path(runner, base_dir)? {
        let configured = PathBuf::from(configured);
        if configured.is_absolute() {
            configured
        } else {
            let root = top_level(runner, base_dir)?.unwrap_or_else(|| base_dir.to_path_buf());
            root.join(configured)
        }
    } else {
        git_dir(runner, base_dir)?.join("hooks")
    };

    tracing::debug!(hooks_dir = %dir.display(), "resolved hooks directory");

    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(Error::HooksDirUnresolvable(format!("{} does not exist", dir.display())))
    }
}
