//! Shorthand duration parsing.
//!
//! Durations are written as `<integer><unit>`, e.g. `30m`, `1h`, `2d` or `1w`.
//! They drive how long `disable-for` keeps the pre-commit hook switched off.

use crate::error::{Error, Result};
use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;

/// Unit suffix of a shorthand duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    /// `s`
    Second,
    /// `m`
    Minute,
    /// `h`
    Hour,
    /// `d`, 24 hours.
    Day,
    /// `w`, 7 days.
    Week,
}

impl DurationUnit {
    /// Parse a unit from its suffix character.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Second),
            'm' => Some(Self::Minute),
            'h' => Some(Self::Hour),
            'd' => Some(Self::Day),
            'w' => Some(Self::Week),
            _ => None,
        }
    }

    /// The suffix character for this unit.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Second => 's',
            Self::Minute => 'm',
            Self::Hour => 'h',
            Self::Day => 'd',
            Self::Week => 'w',
        }
    }

    /// Number of seconds in one unit.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 60 * 60,
            Self::Day => 24 * 60 * 60,
            Self::Week => 7 * 24 * 60 * 60,
        }
    }
}

/// A parsed `<integer><unit>` duration.
///
/// The amount is signed: `-1h` parses, and it is up to the caller to decide
/// whether a negative span makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShorthandDuration {
    /// How many units.
    pub amount: i64,
    /// The unit.
    pub unit: DurationUnit,
}

impl ShorthandDuration {
    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Convert to an elapsed span.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDuration`] if the span does not fit in a
    /// [`TimeDelta`].
    pub fn to_time_delta(&self) -> Result<TimeDelta> {
        self.amount
            .checked_mul(self.unit.seconds())
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| Error::InvalidDuration {
                input: self.to_string(),
                reason: "duration is too large".to_string(),
            })
    }
}

impl fmt::Display for ShorthandDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for ShorthandDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDuration {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if s.chars().count() < 2 {
            return Err(invalid("too short, expected a format like '1h' or '2d'"));
        }

        // Length checked above, so there is a last char.
        let Some(suffix) = s.chars().last() else {
            return Err(invalid("too short, expected a format like '1h' or '2d'"));
        };
        let numeric = &s[..s.len() - suffix.len_utf8()];

        let amount: i64 =
            numeric.parse().map_err(|_| invalid("unable to parse the numeric part"))?;

        let unit = DurationUnit::from_suffix(suffix).ok_or_else(|| {
            invalid("must end with 's' (seconds), 'm' (minutes), 'h' (hours), 'd' (days) or 'w' (weeks)")
        })?;

        Ok(Self { amount, unit })
    }
}

/// Parse a shorthand duration string straight into a span.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] for strings shorter than two characters,
/// a non-numeric amount, an unknown unit, or a span too large to represent.
pub fn parse_duration(input: &str) -> Result<TimeDelta> {
    input.parse::<ShorthandDuration>()?.to_time_delta()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_duration("1h").unwrap(), TimeDelta::hours(1));
        assert_eq!(parse_duration("10h").unwrap(), TimeDelta::hours(10));
    }

    #[test]
    fn test_parse_days_is_24_hours() {
        assert_eq!(parse_duration("2d").unwrap(), TimeDelta::hours(48));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration("30m").unwrap(), TimeDelta::minutes(30));
    }

    #[test]
    fn test_parse_seconds_and_weeks() {
        assert_eq!(parse_duration("45s").unwrap(), TimeDelta::seconds(45));
        assert_eq!(parse_duration("1w").unwrap(), TimeDelta::days(7));
    }

    #[test]
    fn test_parse_zero_is_zero_span() {
        assert_eq!(parse_duration("0d").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_parse_rejects_missing_unit() {
        assert!(matches!(parse_duration("5"), Err(Error::InvalidDuration { .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = parse_duration("2x").unwrap_err();
        assert!(matches!(err, Error::InvalidDuration { .. }));
        assert!(err.to_string().contains("must end with"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(parse_duration(""), Err(Error::InvalidDuration { .. })));
    }

    #[test]
    fn test_parse_rejects_non_numeric_amount() {
        let err = parse_duration("abch").unwrap_err();
        assert!(err.to_string().contains("numeric part"));
        assert!(parse_duration("1.5h").is_err());
        assert!(parse_duration("h").is_err());
    }

    #[test]
    fn test_parse_multibyte_suffix_does_not_panic() {
        assert!(parse_duration("1é").is_err());
        assert!(parse_duration("é").is_err());
    }

    #[test]
    fn test_negative_amount_parses() {
        let parsed: ShorthandDuration = "-2h".parse().unwrap();
        assert!(parsed.is_negative());
        assert_eq!(parsed.to_time_delta().unwrap(), TimeDelta::hours(-2));
    }

    #[test]
    fn test_explicit_plus_sign_parses() {
        assert_eq!(parse_duration("+3m").unwrap(), TimeDelta::minutes(3));
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let err = parse_duration(&format!("{}w", i64::MAX)).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_display_round_trips_input() {
        let parsed: ShorthandDuration = "15m".parse().unwrap();
        assert_eq!(parsed.to_string(), "15m");
        assert_eq!(parsed.unit, DurationUnit::Minute);
        assert_eq!(parsed.amount, 15);
    }
}
