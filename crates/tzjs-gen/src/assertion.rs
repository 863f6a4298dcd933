//! Test assertions emitted into the suite
//!
//! Two shapes exist: an offset assertion (`zoneAt(zone, instant)` must
//! report a given offset and abbreviation) and an enumeration assertion
//! (`datesFor(zone, civil time)` must list exactly the given instants).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timestamp::Timestamp;

/// Offset in force at an instant, with its abbreviation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneOffset {
    /// Seconds east of UTC
    pub offset: i32,
    /// Abbreviation, e.g. `PST`
    pub abbr: String,
}

impl ZoneOffset {
    /// Create a new offset/abbreviation pair
    #[must_use]
    pub fn new(offset: i32, abbr: impl Into<String>) -> Self {
        Self {
            offset,
            abbr: abbr.into(),
        }
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+})", self.abbr, self.offset)
    }
}

/// `zoneAt(zone, instant)` must yield `expected`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetAssertion {
    /// Zone name
    pub zone: String,
    /// Instant under test
    #[serde(rename = "instant_ms")]
    pub instant: Timestamp,
    /// Expected offset and abbreviation
    pub expected: ZoneOffset,
}

impl OffsetAssertion {
    /// Create a new offset assertion
    #[must_use]
    pub fn new(zone: impl Into<String>, instant: Timestamp, expected: ZoneOffset) -> Self {
        Self {
            zone: zone.into(),
            instant,
            expected,
        }
    }
}

/// A local wall-clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilTime {
    /// Year
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Hour (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
}

impl CivilTime {
    /// Create a civil time
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// One instant matching a civil time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationResult {
    /// Offset and abbreviation in force at `instant`
    pub expected: ZoneOffset,
    /// The absolute instant
    #[serde(rename = "instant_ms")]
    pub instant: Timestamp,
}

/// `datesFor(zone, civil)` must yield exactly `results`, chronologically
///
/// Zero results is a spring-forward gap, two an overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationAssertion {
    /// Zone name
    pub zone: String,
    /// Local wall-clock time being enumerated
    pub civil: CivilTime,
    /// Matching instants in ascending order
    pub results: Vec<EnumerationResult>,
}

impl EnumerationAssertion {
    /// Start an enumeration assertion with no results (a gap)
    #[must_use]
    pub fn new(zone: impl Into<String>, civil: CivilTime) -> Self {
        Self {
            zone: zone.into(),
            civil,
            results: Vec::new(),
        }
    }

    /// Append a matching instant
    #[must_use]
    pub fn with_result(mut self, offset: i32, abbr: &str, instant: Timestamp) -> Self {
        self.results.push(EnumerationResult {
            expected: ZoneOffset::new(offset, abbr),
            instant,
        });
        self
    }

    /// True when the results are in strictly ascending order
    #[must_use]
    pub fn is_chronological(&self) -> bool {
        self.results.windows(2).all(|w| w[0].instant < w[1].instant)
    }
}

/// Any assertion in the suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestAssertion {
    /// `zoneAt` check
    Offset(OffsetAssertion),
    /// `datesFor` check
    Enumeration(EnumerationAssertion),
}

impl TestAssertion {
    /// Zone this assertion targets
    #[must_use]
    pub fn zone(&self) -> &str {
        match self {
            Self::Offset(a) => &a.zone,
            Self::Enumeration(a) => &a.zone,
        }
    }
}

impl From<OffsetAssertion> for TestAssertion {
    fn from(a: OffsetAssertion) -> Self {
        Self::Offset(a)
    }
}

impl From<EnumerationAssertion> for TestAssertion {
    fn from(a: EnumerationAssertion) -> Self {
        Self::Enumeration(a)
    }
}
