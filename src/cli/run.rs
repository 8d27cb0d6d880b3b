//! Command execution for the CLI.

use crate::cli::{Cli, Command};
use crate::command::RealCommandRunner;
use crate::config::FishermanConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::hook_file;
use crate::logger::{self, Severity};
use crate::traits::CommandRunner;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    /// Build a single-message output. `color` forces styling on or off;
    /// `None` detects it on the stream the message is printed to.
    fn message(severity: Severity, text: &str, color: Option<bool>) -> Self {
        let color = color.unwrap_or_else(|| logger::colors_supported(severity));
        let line = logger::format(severity, text, color);
        let (stdout, stderr) =
            if severity.is_diagnostic() { (vec![], vec![line]) } else { (vec![line], vec![]) };
        let exit_code =
            if severity == Severity::Error { ExitCode::from(1) } else { ExitCode::SUCCESS };
        Self { exit_code, stdout, stderr }
    }
}

/// Run a parsed command line in the current directory.
pub fn run(cli: &Cli) -> CliOutput {
    run_in(&cli.command, Path::new("."), &RealCommandRunner::new(), cli.no_color)
}

/// Run a command against the repository containing `base_dir`.
pub fn run_in(
    command: &Command,
    base_dir: &Path,
    runner: &dyn CommandRunner,
    no_color: bool,
) -> CliOutput {
    let flag_color = no_color.then_some(false);
    if !command.needs_repository() {
        return CliOutput::message(Severity::Info, &version_line(), flag_color);
    }

    let (hook_path, color) = match locate_hook(base_dir, runner, no_color) {
        Ok(found) => found,
        Err(e) => return CliOutput::message(Severity::Error, &e.to_string(), flag_color),
    };
    tracing::debug!(hook = %hook_path.display(), ?command, "running command");

    match execute(command, &hook_path) {
        Ok((severity, text)) => CliOutput::message(severity, &text, color),
        Err(e) => CliOutput::message(
            Severity::Error,
            &format!("{}: {e}", command.failure_context()),
            color,
        ),
    }
}

/// Check the repository, load config, and find the hook file.
///
/// Returns the hook path and the color override: `Some` when the flag or
/// config decides, `None` to detect the terminal.
fn locate_hook(
    base_dir: &Path,
    runner: &dyn CommandRunner,
    no_color: bool,
) -> Result<(PathBuf, Option<bool>)> {
    if !git::is_git_repo(runner, base_dir) {
        return Err(Error::NotARepository);
    }

    let root = git::top_level(runner, base_dir)?.unwrap_or_else(|| base_dir.to_path_buf());
    let config = FishermanConfig::load_from(&root)?.unwrap_or_default();
    let color = if no_color { Some(false) } else { config.color };

    let hooks_dir = match config.hooks_dir_in(&root) {
        Some(dir) if dir.is_dir() => dir,
        Some(dir) => {
            return Err(Error::HooksDirUnresolvable(format!(
                "{} (from {}) does not exist",
                dir.display(),
                crate::config::CONFIG_FILE_PATH
            )))
        }
        None => git::hooks_dir(runner, base_dir)?,
    };

    Ok((hook_file::hook_path(&hooks_dir), color))
}

fn execute(command: &Command, hook_path: &Path) -> Result<(Severity, String)> {
    let outcome = match command {
        Command::Enable { file } => hook_file::enable(hook_path, file.as_deref())?,
        Command::Disable => hook_file::disable(hook_path)?,
        Command::DisableFor { duration } => hook_file::disable_for(hook_path, duration)?,
        Command::Status => {
            return Ok((Severity::Info, hook_file::status(hook_path)?.message()));
        }
        Command::Version => return Ok((Severity::Info, version_line())),
    };

    let severity = if outcome.is_warning() { Severity::Warning } else { Severity::Success };
    Ok((severity, outcome.message()))
}

fn version_line() -> String {
    format!("fisherman v{}", crate::VERSION)
}
