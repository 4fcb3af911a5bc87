//! Date-time values.
//!
//! A date-time token has no tag of its own, so it is recognised by trying a
//! chain of interpretations and keeping the first that succeeds:
//!
//! 1. offset date-time (`1979-05-27T07:32:00-08:00`, `1979-05-27T07:32:00Z`)
//! 2. the same text with its *first* space replaced by `T`, as offset date-time
//! 3. local date-time (`1979-05-27T07:32:00`, `1979-05-27 07:32:00.999`)
//! 4. local date (`1979-05-27`)
//!
//! ```rust
//! use toml_tree::datetime::{parse_date_time, DateTime};
//!
//! let with_t = parse_date_time("1979-05-27T07:32:00-08:00").unwrap();
//! let with_space = parse_date_time("1979-05-27 07:32:00-08:00").unwrap();
//! assert_eq!(with_t, with_space);
//! assert!(matches!(parse_date_time("1979-05-27"), Some(DateTime::LocalDate(_))));
//! ```

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Serialize, Serializer};
use std::fmt;

const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the three date-time shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateTime {
    /// Date and time with a UTC offset.
    Offset(chrono::DateTime<FixedOffset>),
    /// Date and time without an offset.
    Local(NaiveDateTime),
    /// Date only.
    LocalDate(NaiveDate),
}

impl DateTime {
    #[inline]
    #[must_use]
    pub const fn is_offset(&self) -> bool {
        matches!(self, DateTime::Offset(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, DateTime::Local(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local_date(&self) -> bool {
        matches!(self, DateTime::LocalDate(_))
    }
}

/// Runs the fallback chain over a trimmed token.
///
/// Returns `None` when no interpretation matches.
#[must_use]
pub fn parse_date_time(text: &str) -> Option<DateTime> {
    let text = text.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(DateTime::Offset(dt));
    }

    // only the first space is a candidate separator
    let substituted = text.replacen(' ', "T", 1);
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&substituted) {
        return Some(DateTime::Offset(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&substituted, LOCAL_DATE_TIME_FORMAT) {
        return Some(DateTime::Local(dt));
    }
    NaiveDate::parse_from_str(text, LOCAL_DATE_FORMAT)
        .ok()
        .map(DateTime::LocalDate)
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTime::Offset(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            DateTime::Local(dt) => write!(f, "{}", dt.format(LOCAL_DATE_TIME_FORMAT)),
            DateTime::LocalDate(date) => write!(f, "{}", date.format(LOCAL_DATE_FORMAT)),
        }
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
