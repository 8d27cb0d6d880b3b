//! Reading, transforming and writing the `pre-commit` hook file.
//!
//! Every operation is a single read-transform-write cycle. The file on disk
//! is the only state; nothing is cached between invocations.

use crate::duration::ShorthandDuration;
use crate::error::{Error, Result};
use crate::git::PRE_COMMIT;
use crate::marker::{DisableBlock, HookScript};
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Permission bits for a written hook.
#[cfg(unix)]
const HOOK_MODE: u32 = 0o755;

/// Last year whose timestamps keep the fixed-width form the hook compares.
const MAX_EXPIRY_YEAR: i32 = 9999;

/// What an operation did to the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Hook content installed or disable markers removed.
    Enabled,
    /// Permanent marker inserted.
    Disabled,
    /// The permanent marker was already there; nothing was written.
    AlreadyDisabled,
    /// Temporary block inserted.
    DisabledUntil(DateTime<Utc>),
}

impl Outcome {
    /// Whether the outcome deserves a warning rather than a success message.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::AlreadyDisabled)
    }

    /// Human readable description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Enabled => "Pre-commit hook enabled".to_string(),
            Self::Disabled => "Pre-commit hook disabled".to_string(),
            Self::AlreadyDisabled => "Pre-commit hook is already disabled".to_string(),
            Self::DisabledUntil(until) => {
                format!("Pre-commit hook disabled until {}", human_time(until))
            }
        }
    }
}

/// Current state of the hook, as read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// No hook file exists.
    Missing,
    /// The hook runs.
    Enabled,
    /// The hook is permanently disabled.
    Disabled,
    /// The hook is skipped until the given time.
    DisabledUntil(DateTime<Utc>),
    /// A temporary disable is still in the file but has run out.
    Expired(DateTime<Utc>),
}

impl HookStatus {
    /// Human readable description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Missing => "No pre-commit hook is installed".to_string(),
            Self::Enabled => "Pre-commit hook is enabled".to_string(),
            Self::Disabled => "Pre-commit hook is disabled".to_string(),
            Self::DisabledUntil(until) => {
                format!("Pre-commit hook is disabled until {}", human_time(until))
            }
            Self::Expired(until) => format!(
                "Pre-commit hook is enabled (temporary disable expired at {})",
                human_time(until)
            ),
        }
    }
}

fn human_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Path of the managed hook inside a hooks directory.
#[must_use]
pub fn hook_path(hooks_dir: &Path) -> PathBuf {
    hooks_dir.join(PRE_COMMIT)
}

/// Read the hook file.
///
/// # Errors
///
/// Returns [`Error::NoHookFile`] if it does not exist, [`Error::Io`] for any
/// other read failure.
pub fn read_hook(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NoHookFile(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}

/// Atomically replace the hook file with `content`, marked executable.
///
/// The content is written to a temporary file next to the hook and then
/// renamed over it.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// renamed.
pub fn write_hook(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new().prefix(".pre-commit.").tempfile_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(std::fs::Permissions::from_mode(HOOK_MODE))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote hook");
    Ok(())
}

/// Enable the hook.
///
/// With a `source`, its raw content becomes the hook verbatim (the hook need
/// not exist yet). Without one, every disable block is removed from the
/// existing hook.
///
/// # Errors
///
/// Returns [`Error::HookSource`] if the source cannot be read,
/// [`Error::NoHookFile`] if there is no hook to re-enable, or
/// [`Error::MalformedBlock`] if an existing block cannot be removed safely.
pub fn enable(path: &Path, source: Option<&Path>) -> Result<Outcome> {
    let content = if let Some(source) = source {
        tracing::info!(source = %source.display(), "installing hook from file");
        std::fs::read(source)
            .map_err(|e| Error::HookSource { path: source.to_path_buf(), source: e })?
    } else {
        let mut script = HookScript::parse(&read_hook(path)?)?;
        tracing::info!(block = ?script.block, "removing disable block");
        script.set_block(DisableBlock::None)?;
        script.render().into_bytes()
    };

    write_hook(path, &content)?;
    Ok(Outcome::Enabled)
}

/// Disable the hook permanently.
///
/// A temporary block is replaced. If the permanent marker is already present
/// the file is left alone.
///
/// # Errors
///
/// Returns [`Error::NoHookFile`] if there is no hook, [`Error::NoShebang`] if
/// it does not start with `#!/bin/sh`.
pub fn disable(path: &Path) -> Result<Outcome> {
    let mut script = HookScript::parse(&read_hook(path)?)?;

    if script.block == DisableBlock::Permanent {
        return Ok(Outcome::AlreadyDisabled);
    }

    script.set_block(DisableBlock::Permanent)?;
    write_hook(path, script.render().as_bytes())?;
    Ok(Outcome::Disabled)
}

/// Disable the hook for a shorthand duration counted from now.
///
/// # Errors
///
/// See [`disable_for_at`].
pub fn disable_for(path: &Path, duration: &str) -> Result<Outcome> {
    disable_for_at(path, duration, Utc::now())
}

/// Disable the hook until `now + duration`.
///
/// Any existing block, permanent or temporary, is replaced. The expiry is
/// truncated to whole seconds, the precision the hook compares at.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] or [`Error::NegativeDuration`] for a
/// bad duration or an expiry past year 9999, [`Error::NoHookFile`] if there
/// is no hook, and [`Error::NoShebang`] if it does not start with `#!/bin/sh`.
pub fn disable_for_at(path: &Path, duration: &str, now: DateTime<Utc>) -> Result<Outcome> {
    let parsed: ShorthandDuration = duration.parse()?;
    if parsed.is_negative() {
        return Err(Error::NegativeDuration(duration.to_string()));
    }

    let until = now
        .checked_add_signed(parsed.to_time_delta()?)
        .filter(|until| until.year() <= MAX_EXPIRY_YEAR)
        .ok_or_else(|| Error::InvalidDuration {
            input: duration.to_string(),
            reason: "expiry is out of range".to_string(),
        })?
        .trunc_subsecs(0);

    let mut script = HookScript::parse(&read_hook(path)?)?;
    script.set_block(DisableBlock::Temporary { until })?;
    write_hook(path, script.render().as_bytes())?;

    tracing::info!(until = %until, "hook temporarily disabled");
    Ok(Outcome::DisabledUntil(until))
}

/// Report the hook's current state.
///
/// # Errors
///
/// Returns an error if the hook exists but cannot be read or parsed.
pub fn status(path: &Path) -> Result<HookStatus> {
    status_at(path, Utc::now())
}

/// Report the hook's state as of `now`.
///
/// # Errors
///
/// Returns an error if the hook exists but cannot be read or parsed.
pub fn status_at(path: &Path, now: DateTime<Utc>) -> Result<HookStatus> {
    let content = match read_hook(path) {
        Ok(content) => content,
        Err(Error::NoHookFile(_)) => return Ok(HookStatus::Missing),
        Err(e) => return Err(e),
    };

    let block = HookScript::parse(&content)?.block;
    Ok(match block {
        DisableBlock::None => HookStatus::Enabled,
        DisableBlock::Permanent => HookStatus::Disabled,
        DisableBlock::Temporary { until } if block.is_active_at(now) => {
            HookStatus::DisabledUntil(until)
        }
        DisableBlock::Temporary { until } => HookStatus::Expired(until),
    })
}
