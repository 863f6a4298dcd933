//! Grammars for external tool output
//!
//! Each parser either returns a typed value or
//! [`Error::MalformedExternalOutput`]. Nothing is parsed on a best-effort
//! basis: a line outside the grammar means the platform behaves in a way
//! the suite cannot vouch for.
//!
//! ```text
//! zdump -v:   <zone>  <utc datetime> = <local datetime> isdst=<0|1> gmtoff=<int>
//!             <zone>  <anything> = NULL
//! date +%Z %::z:   <abbr> <sign><HH>:<MM>:<SS>
//! date +%s:        <int>
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::assertion::ZoneOffset;
use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

const ZDUMP: &str = "zdump";
const DATE: &str = "date";

/// Suffix of a transition that has no civil-time representation
const NULL_SENTINEL: &str = " = NULL";

/// `%Z %::z` output, e.g. `PDT -07:00:00`
static ZONE_DESIGNATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // Literal pattern, cannot fail to compile
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^([^ ]*) ([+-])(\d{2}):(\d{2}):(\d{2})$").unwrap()
});

/// A parsed `zdump -v` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpLine {
    /// Null-transition sentinel, skipped by the extractor
    Null,
    /// A transition record
    Record(DumpRecord),
}

/// The fields of a `zdump -v` transition line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRecord {
    /// UTC side, e.g. `Sun Mar 13 10:00:00 2011 UT`
    pub utc: String,
    /// Local side, e.g. `Sun Mar 13 03:00:00 2011 PDT`
    pub local: String,
    /// Abbreviation (last token of the local side)
    pub abbr: String,
    /// Daylight-saving flag
    pub is_dst: bool,
    /// Seconds east of UTC
    pub utc_offset: i32,
}

/// Record grammar for one zone's `zdump -v` output
#[derive(Debug, Clone)]
pub struct ZdumpGrammar {
    zone: String,
    record: Regex,
}

impl ZdumpGrammar {
    /// Build the grammar for `zone`
    ///
    /// The zone name is matched literally (names such as `Etc/GMT+5`
    /// contain regex metacharacters).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneList`] if the pattern cannot be built.
    pub fn new(zone: &str) -> Result<Self> {
        let pattern = format!(
            r"^{}  ([^=]+) = ([^=]+) isdst=([01]) gmtoff=(-?\d+)$",
            regex::escape(zone)
        );
        let record = Regex::new(&pattern)
            .map_err(|e| Error::InvalidZoneList(format!("{zone}: {e}")))?;
        Ok(Self {
            zone: zone.to_string(),
            record,
        })
    }

    /// Zone this grammar matches
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Parse one line (without its trailing newline)
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedExternalOutput`] for any line that is
    /// neither a sentinel nor a record of this zone.
    pub fn parse_line(&self, line: &str) -> Result<DumpLine> {
        if line.ends_with(NULL_SENTINEL) {
            return Ok(DumpLine::Null);
        }
        let caps = self
            .record
            .captures(line)
            .ok_or_else(|| Error::malformed(ZDUMP, line))?;

        let local = caps[2].to_string();
        let abbr = local
            .split_whitespace()
            .last()
            .ok_or_else(|| Error::malformed(ZDUMP, line))?
            .to_string();
        let utc_offset: i32 = caps[4]
            .parse()
            .map_err(|_| Error::malformed(ZDUMP, line))?;

        Ok(DumpLine::Record(DumpRecord {
            utc: caps[1].to_string(),
            local,
            abbr,
            is_dst: &caps[3] == "1",
            utc_offset,
        }))
    }
}

/// Parse `date '+%Z %::z'` output into an offset and abbreviation
///
/// `+` is east of UTC, `-` west.
///
/// # Errors
///
/// Returns [`Error::MalformedExternalOutput`] if the line does not match.
pub fn parse_zone_designation(line: &str) -> Result<ZoneOffset> {
    let line = line.trim_end_matches('\n');
    let caps = ZONE_DESIGNATION_REGEX
        .captures(line)
        .ok_or_else(|| Error::malformed(DATE, line))?;

    let field = |i: usize| -> Result<i32> {
        caps[i].parse().map_err(|_| Error::malformed(DATE, line))
    };
    let magnitude = 3600 * field(3)? + 60 * field(4)? + field(5)?;
    let offset = if &caps[2] == "+" { magnitude } else { -magnitude };

    Ok(ZoneOffset::new(offset, &caps[1]))
}

/// Parse `date +%s` output into seconds since the epoch
///
/// # Errors
///
/// Returns [`Error::MalformedExternalOutput`] if the line is not an integer
/// or lies outside the range a [`Timestamp`] can hold.
pub fn parse_epoch_seconds(line: &str) -> Result<i64> {
    let line = line.trim_end_matches('\n');
    line.parse::<i64>()
        .ok()
        .filter(|secs| Timestamp::checked_from_secs(*secs).is_some())
        .ok_or_else(|| Error::malformed(DATE, line))
}
