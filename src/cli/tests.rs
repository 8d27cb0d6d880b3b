//! Tests for the CLI module.

use super::*;
use crate::config::FishermanConfig;
use crate::marker::{PERMANENT_COMMENT, TEMPORARY_TAG};
use crate::testing::MockCommandRunner;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tempfile::TempDir;

const SCRIPT: &str = "#!/bin/sh\necho hi\n";

/// A temp dir laid out like a fresh repository with `.git/hooks`.
fn repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
    dir
}

fn hook(dir: &Path) -> std::path::PathBuf {
    dir.join(".git/hooks/pre-commit")
}

/// Expect the git calls made when locating the hook in a repository
/// without `core.hooksPath`.
fn repo_runner(top: &Path) -> MockCommandRunner {
    let mut runner = MockCommandRunner::new();
    runner.expect_git(&["rev-parse", "--git-dir"], ".git\n");
    runner.expect_git(&["rev-parse", "--show-toplevel"], &format!("{}\n", top.display()));
    runner.expect_git_failure(&["config", "--path", "--get", "core.hooksPath"], 1);
    runner.expect_git(&["rev-parse", "--git-dir"], ".git\n");
    runner
}

fn run_plain(command: &Command, dir: &Path, runner: &MockCommandRunner) -> CliOutput {
    run_in(command, dir, runner, true)
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["fisherman", "disable"]).unwrap();
    assert_eq!(cli.command, Command::Disable);
    assert!(!cli.no_color);

    let cli = Cli::try_parse_from(["fisherman", "enable", "--file", "hook.sh"]).unwrap();
    assert_eq!(cli.command, Command::Enable { file: Some("hook.sh".into()) });

    let cli = Cli::try_parse_from(["fisherman", "--no-color", "disable-for", "30m"]).unwrap();
    assert_eq!(cli.command, Command::DisableFor { duration: "30m".to_string() });
    assert!(cli.no_color);
}

#[test]
fn test_parse_negative_duration_reaches_command() {
    let cli = Cli::try_parse_from(["fisherman", "disable-for", "-1h"]).unwrap();
    assert_eq!(cli.command, Command::DisableFor { duration: "-1h".to_string() });
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["fisherman"]).is_err());
    assert!(Cli::try_parse_from(["fisherman", "disable-for"]).is_err());
}

#[test]
fn test_command_needs_repository() {
    assert!(!Command::Version.needs_repository());
    assert!(Command::Disable.needs_repository());
    assert!(Command::Status.needs_repository());
    assert!(Command::Enable { file: None }.needs_repository());
}

#[test]
fn test_run_version() {
    let runner = MockCommandRunner::new();
    let output = run_plain(&Command::Version, Path::new("."), &runner);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, vec![format!("fisherman v{}", crate::VERSION)]);
    runner.verify();
}

#[test]
fn test_run_outside_repository() {
    let mut runner = MockCommandRunner::new();
    runner.expect_git_failure(&["rev-parse", "--git-dir"], 128);

    let output = run_plain(&Command::Disable, Path::new("."), &runner);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert_eq!(output.stderr, vec!["This is not a Git repository".to_string()]);
}

#[test]
fn test_run_disable() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    let runner = repo_runner(dir.path());

    let output = run_plain(&Command::Disable, dir.path(), &runner);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, vec!["Pre-commit hook disabled".to_string()]);
    assert!(output.stderr.is_empty());
    runner.verify();

    let content = std::fs::read_to_string(hook(dir.path())).unwrap();
    assert!(content.starts_with(&format!("#!/bin/sh\n{PERMANENT_COMMENT}\nexit 0\necho hi")));
}

#[test]
fn test_run_disable_twice_warns() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    run_plain(&Command::Disable, dir.path(), &repo_runner(dir.path()));

    let output = run_plain(&Command::Disable, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert!(output.stdout.is_empty());
    assert_eq!(output.stderr, vec!["Pre-commit hook is already disabled".to_string()]);
}

#[test]
fn test_run_disable_without_hook() {
    let dir = repo();
    let output = run_plain(&Command::Disable, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].starts_with("Error disabling pre-commit hook: No pre-commit hook"));
}

#[test]
fn test_run_enable_restores_hook() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    run_plain(&Command::Disable, dir.path(), &repo_runner(dir.path()));

    let output = run_plain(&Command::Enable { file: None }, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert_eq!(output.stdout, vec!["Pre-commit hook enabled".to_string()]);
    assert_eq!(std::fs::read_to_string(hook(dir.path())).unwrap(), SCRIPT);
}

#[test]
fn test_run_enable_from_file() {
    let dir = repo();
    let source = dir.path().join("my-hook.sh");
    std::fs::write(&source, "#!/bin/sh\ncargo fmt --check\n").unwrap();

    let command = Command::Enable { file: Some(source) };
    let output = run_plain(&command, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert_eq!(
        std::fs::read_to_string(hook(dir.path())).unwrap(),
        "#!/bin/sh\ncargo fmt --check\n"
    );
}

#[test]
fn test_run_disable_for() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();

    let command = Command::DisableFor { duration: "2h".to_string() };
    let output = run_plain(&command, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert!(output.stdout[0].starts_with("Pre-commit hook disabled until "));
    assert!(output.stdout[0].ends_with(" UTC"));

    let content = std::fs::read_to_string(hook(dir.path())).unwrap();
    assert!(content.contains(TEMPORARY_TAG));
    assert!(content.ends_with("fi\necho hi\n"));
}

#[test]
fn test_run_disable_for_invalid_duration() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();

    let command = Command::DisableFor { duration: "2x".to_string() };
    let output = run_plain(&command, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].contains("Invalid duration format '2x'"));
    assert_eq!(std::fs::read_to_string(hook(dir.path())).unwrap(), SCRIPT);
}

#[test]
fn test_run_status() {
    let dir = repo();
    let output = run_plain(&Command::Status, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.stdout, vec!["No pre-commit hook is installed".to_string()]);

    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    run_plain(
        &Command::DisableFor { duration: "1d".to_string() },
        dir.path(),
        &repo_runner(dir.path()),
    );
    let output = run_plain(&Command::Status, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    assert!(output.stdout[0].starts_with("Pre-commit hook is disabled until "));
}

#[test]
fn test_run_uses_configured_hooks_dir() {
    let dir = repo();
    std::fs::create_dir_all(dir.path().join(".githooks")).unwrap();
    std::fs::write(dir.path().join(".githooks/pre-commit"), SCRIPT).unwrap();
    FishermanConfig { hooks_dir: Some(".githooks".into()), color: None }
        .save_to(dir.path())
        .unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git(&["rev-parse", "--git-dir"], ".git\n");
    runner.expect_git(&["rev-parse", "--show-toplevel"], &format!("{}\n", dir.path().display()));

    let output = run_plain(&Command::Disable, dir.path(), &runner);
    assert_eq!(output.exit_code, ExitCode::SUCCESS);
    runner.verify();

    let content = std::fs::read_to_string(dir.path().join(".githooks/pre-commit")).unwrap();
    assert!(content.contains(PERMANENT_COMMENT));
    assert!(!hook(dir.path()).exists());
}

#[test]
fn test_run_configured_hooks_dir_missing() {
    let dir = repo();
    FishermanConfig { hooks_dir: Some("nowhere".into()), color: None }
        .save_to(dir.path())
        .unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git(&["rev-parse", "--git-dir"], ".git\n");
    runner.expect_git(&["rev-parse", "--show-toplevel"], &format!("{}\n", dir.path().display()));

    let output = run_plain(&Command::Disable, dir.path(), &runner);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].contains("Could not resolve the Git hooks directory"));
}

#[test]
fn test_run_config_forces_color() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    FishermanConfig { hooks_dir: None, color: Some(true) }.save_to(dir.path()).unwrap();

    let output = run_in(&Command::Disable, dir.path(), &repo_runner(dir.path()), false);
    assert!(output.stdout[0].starts_with('\u{1b}'));
    assert!(output.stdout[0].contains("Pre-commit hook disabled"));
}

#[test]
fn test_run_config_color_applies_to_stderr_warnings() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    crate::hook_file::disable(&hook(dir.path())).unwrap();
    FishermanConfig { hooks_dir: None, color: Some(true) }.save_to(dir.path()).unwrap();

    let output = run_in(&Command::Disable, dir.path(), &repo_runner(dir.path()), false);
    assert!(output.stdout.is_empty());
    assert!(output.stderr[0].starts_with('\u{1b}'));
    assert!(output.stderr[0].contains("Pre-commit hook is already disabled"));
}

#[test]
fn test_run_no_color_overrides_config() {
    let dir = repo();
    std::fs::write(hook(dir.path()), SCRIPT).unwrap();
    FishermanConfig { hooks_dir: None, color: Some(true) }.save_to(dir.path()).unwrap();

    let output = run_plain(&Command::Disable, dir.path(), &repo_runner(dir.path()));
    assert_eq!(output.stdout, vec!["Pre-commit hook disabled".to_string()]);
}

#[test]
fn test_run_invalid_config() {
    let dir = repo();
    std::fs::write(dir.path().join(".fisherman.yaml"), "colour: yes\n").unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git(&["rev-parse", "--git-dir"], ".git\n");
    runner.expect_git(&["rev-parse", "--show-toplevel"], &format!("{}\n", dir.path().display()));

    let output = run_plain(&Command::Status, dir.path(), &runner);
    assert_eq!(output.exit_code, ExitCode::from(1));
    assert!(output.stderr[0].starts_with("Config error"));
}
