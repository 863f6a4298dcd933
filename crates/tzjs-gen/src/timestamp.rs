//! Millisecond-exact instants
//!
//! Every instant in the suite is held as whole milliseconds since the
//! epoch so that rendering is exact and reproducible: the literal written
//! into the report is derived from an integer, never from float
//! formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Upper bound year of the tested domain
pub const DEFAULT_CUTOFF_YEAR: i32 = 2050;

/// 2050-01-01T00:00:00Z in seconds since the epoch
pub const DEFAULT_CUTOFF_SECS: i64 = 2_524_608_000;

/// An instant in milliseconds since 1970-01-01T00:00:00Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp {
    millis: i64,
}

impl Timestamp {
    /// The epoch itself
    pub const EPOCH: Self = Self { millis: 0 };

    /// Create from whole seconds
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    /// Create from whole seconds, `None` if the instant has no
    /// millisecond representation
    #[must_use]
    pub const fn checked_from_secs(secs: i64) -> Option<Self> {
        match secs.checked_mul(1000) {
            Some(millis) => Some(Self { millis }),
            None => None,
        }
    }

    /// Create from milliseconds
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Milliseconds since the epoch
    #[must_use]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Whole seconds, truncated toward zero
    #[must_use]
    pub const fn trunc_secs(&self) -> i64 {
        self.millis / 1000
    }

    /// Seconds as a float (for display and statistics only)
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.millis as f64 / 1000.0
    }

    /// True for pre-epoch instants
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.millis < 0
    }
}

impl fmt::Display for Timestamp {
    /// Renders as a JavaScript number literal in seconds:
    /// `1320568200`, `1300010399.999`, `1308469553.5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let abs = self.millis.unsigned_abs();
        let (secs, frac) = (abs / 1000, abs % 1000);
        if frac == 0 {
            write!(f, "{sign}{secs}")
        } else {
            let digits = format!("{frac:03}");
            write!(f, "{sign}{secs}.{}", digits.trim_end_matches('0'))
        }
    }
}

/// 00:00:00 UTC on January 1 of `year`, the exclusive ceiling of the
/// tested domain.
///
/// # Errors
///
/// Returns [`Error::InvalidCutoff`] for years at or before 1970 (the
/// domain would be empty) or outside chrono's calendar range.
pub fn cutoff_instant(year: i32) -> Result<Timestamp> {
    if year <= 1970 {
        return Err(Error::InvalidCutoff(year));
    }
    let midnight = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(Error::InvalidCutoff(year))?;
    Ok(Timestamp::from_secs(midnight.and_utc().timestamp()))
}
