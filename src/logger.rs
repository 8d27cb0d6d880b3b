//! Console message styling.
//!
//! Formatting is a pure function of severity, text and whether color is
//! wanted. Printing is left to the binary.

use console::{style, Term};

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// An operation completed.
    Success,
    /// Neutral information.
    Info,
    /// Completed, but the user should know something.
    Warning,
    /// The operation failed.
    Error,
}

impl Severity {
    /// Whether messages of this severity belong on stderr.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Style `message` for `severity`. With `color` off the text is returned as is.
#[must_use]
pub fn format(severity: Severity, message: &str, color: bool) -> String {
    let styled = match severity {
        Severity::Success => style(message).green(),
        Severity::Info => style(message),
        Severity::Warning => style(message).yellow(),
        Severity::Error => style(message).red(),
    };
    styled.force_styling(color).to_string()
}

/// The terminal a message of `severity` is printed to.
#[must_use]
pub fn terminal_for(severity: Severity) -> Term {
    if severity.is_diagnostic() {
        Term::stderr()
    } else {
        Term::stdout()
    }
}

/// Whether the stream `severity` is printed to understands color.
#[must_use]
pub fn colors_supported(severity: Severity) -> bool {
    terminal_for(severity).features().colors_supported()
}
