//! Disable markers inside a pre-commit hook script.
//!
//! A hook script is treated as a sequence of lines: an optional shebang, at
//! most one disable block, and the body. A disable block is either the
//! permanent marker
//!
//! ```text
//! # Pre-commit hook disabled by Fisherman
//! exit 0
//! ```
//!
//! or a temporary block that exits early until a UTC timestamp passes:
//!
//! ```text
//! # Temporarily disabled by Fisherman
//! current_date=$(date -u +"%Y-%m-%dT%H:%M:%SZ")
//! if [ "$current_date" \< "2030-01-01T00:00:00Z" ]; then
//!     exit 0
//! fi
//! ```
//!
//! The shell compares the two timestamps as strings, which works because
//! both are rendered in the same fixed-width UTC format.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::ops::Range;

/// The only shebang line markers can be inserted after.
pub const SHEBANG_LINE: &str = "#!/bin/sh\n";

/// Comment line of the permanent marker.
pub const PERMANENT_COMMENT: &str = "# Pre-commit hook disabled by Fisherman";

/// Comment line that opens a temporary block.
pub const TEMPORARY_TAG: &str = "# Temporarily disabled by Fisherman";

const PERMANENT_MARKER: &str = "# Pre-commit hook disabled by Fisherman\nexit 0\n";

/// Which kind of disabling is present in a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableBlock {
    /// The hook runs normally.
    None,
    /// The hook exits immediately on every run.
    Permanent,
    /// The hook exits immediately until `until` has passed.
    Temporary {
        /// Expiry, compared against the current UTC time by the shell.
        until: DateTime<Utc>,
    },
}

impl DisableBlock {
    /// Render the block as script lines. Empty for [`DisableBlock::None`].
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Permanent => PERMANENT_MARKER.to_string(),
            Self::Temporary { until } => format!(
                "{TEMPORARY_TAG}\n\
                 current_date=$(date -u +\"%Y-%m-%dT%H:%M:%SZ\")\n\
                 if [ \"$current_date\" \\< \"{}\" ]; then\n\
                 \texit 0\n\
                 fi\n",
                format_timestamp(until)
            ),
        }
    }

    /// Whether a hook carrying this block skips its checks at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::None => false,
            Self::Permanent => true,
            Self::Temporary { until } => format_timestamp(&now) < format_timestamp(until),
        }
    }
}

/// Format a timestamp the way the generated shell snippet does.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Structured view of a hook script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookScript {
    /// The first line, including its newline, if it starts with `#!`.
    pub shebang: Option<String>,
    /// The disable block currently in effect.
    pub block: DisableBlock,
    /// Everything else, verbatim.
    pub body: String,
}

impl HookScript {
    /// Parse hook content.
    ///
    /// Every permanent marker and complete temporary block is lifted out of
    /// the body. If both kinds are present the permanent one wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBlock`] if a temporary block has no closing
    /// `fi` or its expiry timestamp cannot be read.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();

        let (shebang, first) = match lines.first() {
            Some(line) if line.starts_with("#!") => (Some((*line).to_string()), 1),
            _ => (None, 0),
        };

        let mut removed = vec![false; lines.len()];

        let permanent = permanent_ranges(&lines, first);
        for range in &permanent {
            removed[range.clone()].fill(true);
        }

        let mut temporary = None;
        let mut from = first;
        loop {
            match find_temporary(&lines, from) {
                TemporarySpan::Absent => break,
                TemporarySpan::Unterminated(start) => {
                    return Err(Error::MalformedBlock {
                        line: start + 1,
                        reason: "temporary disable block has no closing 'fi'",
                    });
                }
                TemporarySpan::Complete(range) => {
                    if temporary.is_none() {
                        let until = read_expiry(&lines[range.clone()]).ok_or(
                            Error::MalformedBlock {
                                line: range.start + 1,
                                reason: "temporary disable block has no readable expiry",
                            },
                        )?;
                        temporary = Some(until);
                    }
                    removed[range.clone()].fill(true);
                    from = range.end;
                }
            }
        }

        let block = if !permanent.is_empty() {
            DisableBlock::Permanent
        } else if let Some(until) = temporary {
            DisableBlock::Temporary { until }
        } else {
            DisableBlock::None
        };

        let body = lines
            .iter()
            .zip(&removed)
            .skip(first)
            .filter(|&(_, &gone)| !gone)
            .map(|(line, _)| *line)
            .collect();

        Ok(Self { shebang, block, body })
    }

    /// Replace the disable block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoShebang`] when installing a block into a script
    /// that does not start with `#!/bin/sh`.
    pub fn set_block(&mut self, block: DisableBlock) -> Result<()> {
        if block != DisableBlock::None && self.shebang.as_deref() != Some(SHEBANG_LINE) {
            return Err(Error::NoShebang);
        }
        self.block = block;
        Ok(())
    }

    /// Serialize back to script text, with the block right after the shebang.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        if let Some(shebang) = &self.shebang {
            out.push_str(shebang);
        }
        out.push_str(&self.block.render());
        out.push_str(&self.body);
        out
    }
}

/// Remove every permanent marker. No-op when there is none.
#[must_use]
pub fn strip_permanent(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let ranges = permanent_ranges(&lines, 0);
    remove_ranges(&lines, &ranges)
}

/// Remove complete temporary blocks.
///
/// A tag line without a later `fi` is left in place, together with
/// everything after it.
#[must_use]
pub fn strip_temporary(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut ranges = Vec::new();
    let mut from = 0;
    while let TemporarySpan::Complete(range) = find_temporary(&lines, from) {
        from = range.end;
        ranges.push(range);
    }
    remove_ranges(&lines, &ranges)
}

/// Insert the permanent marker after the shebang line.
///
/// # Errors
///
/// Returns [`Error::NoShebang`] unless `text` starts with `#!/bin/sh\n`.
pub fn insert_permanent(text: &str) -> Result<String> {
    insert_block(text, DisableBlock::Permanent)
}

/// Insert a temporary block expiring at `until` after the shebang line.
///
/// # Errors
///
/// Returns [`Error::NoShebang`] unless `text` starts with `#!/bin/sh\n`.
pub fn insert_temporary(text: &str, until: DateTime<Utc>) -> Result<String> {
    insert_block(text, DisableBlock::Temporary { until })
}

fn insert_block(text: &str, block: DisableBlock) -> Result<String> {
    let rest = text.strip_prefix(SHEBANG_LINE).ok_or(Error::NoShebang)?;
    Ok(format!("{SHEBANG_LINE}{}{rest}", block.render()))
}

enum TemporarySpan {
    Absent,
    Unterminated(usize),
    Complete(Range<usize>),
}

fn line_content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn permanent_ranges(lines: &[&str], from: usize) -> Vec<Range<usize>> {
    let (comment, exit) = PERMANENT_MARKER.split_at(PERMANENT_COMMENT.len() + 1);
    let mut ranges = Vec::new();
    let mut i = from;
    while i + 1 < lines.len() {
        if lines[i] == comment && lines[i + 1] == exit {
            ranges.push(i..i + 2);
            i += 2;
        } else {
            i += 1;
        }
    }
    ranges
}

fn find_temporary(lines: &[&str], from: usize) -> TemporarySpan {
    let Some(start) = (from..lines.len()).find(|&i| lines[i].contains(TEMPORARY_TAG)) else {
        return TemporarySpan::Absent;
    };
    match (start + 1..lines.len()).find(|&i| line_content(lines[i]) == "fi") {
        Some(end) => TemporarySpan::Complete(start..end + 1),
        None => TemporarySpan::Unterminated(start),
    }
}

/// Pull the quoted timestamp out of the `if [ ... \< "<until>" ]` line.
fn read_expiry(block: &[&str]) -> Option<DateTime<Utc>> {
    block.iter().find_map(|line| {
        let (_, after) = line.split_once("\\< \"")?;
        let (value, _) = after.split_once('"')?;
        DateTime::parse_from_rfc3339(value).ok().map(|ts| ts.with_timezone(&Utc))
    })
}

fn remove_ranges(lines: &[&str], ranges: &[Range<usize>]) -> String {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !ranges.iter().any(|r| r.contains(i)))
        .map(|(_, line)| *line)
        .collect()
}
