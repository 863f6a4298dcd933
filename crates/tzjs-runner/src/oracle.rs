//! Reference oracle: the ground truth every assertion is checked against
//!
//! [`CommandOracle`] asks the system tz tools. [`MockZoneOracle`] answers
//! from in-memory tables so extraction and orchestration can be tested
//! without processes.

use std::collections::BTreeMap;

use tzjs_gen::{
    DumpLine, Timestamp, TransitionRecord, ZdumpGrammar, ZoneOffset, cutoff_instant,
    parse_epoch_seconds, parse_zone_designation,
};

use crate::command::{CommandRunner, command_line};
use crate::error::{Error, Result};

/// Capability answering questions about a zone's history
pub trait ZoneOracle {
    /// Every offset-changing transition of `zone` before `cutoff_year`, in
    /// ascending order
    ///
    /// # Errors
    ///
    /// Fails on malformed tool output or a failed tool invocation.
    fn list_transitions(&self, zone: &str, cutoff_year: i32) -> Result<Vec<TransitionRecord>>;

    /// Offset and abbreviation in force in `zone` at `instant`, truncated
    /// toward zero to whole seconds
    ///
    /// # Errors
    ///
    /// Fails on malformed tool output or a failed tool invocation.
    fn query_offset_and_abbrev(&self, zone: &str, instant: Timestamp) -> Result<ZoneOffset>;
}

impl<O: ZoneOracle + ?Sized> ZoneOracle for &O {
    fn list_transitions(&self, zone: &str, cutoff_year: i32) -> Result<Vec<TransitionRecord>> {
        (**self).list_transitions(zone, cutoff_year)
    }

    fn query_offset_and_abbrev(&self, zone: &str, instant: Timestamp) -> Result<ZoneOffset> {
        (**self).query_offset_and_abbrev(zone, instant)
    }
}

/// Oracle backed by `zdump` and `date`
#[derive(Debug, Clone)]
pub struct CommandOracle<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> CommandOracle<R> {
    /// Wrap a command runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolve a zdump UTC string to epoch seconds
    fn resolve_utc(&self, datetime: &str) -> Result<i64> {
        let output = self
            .runner
            .date_epoch(datetime)?
            .check(format!("date --date={datetime} +%s"))?;
        Ok(parse_epoch_seconds(first_line(&output.stdout))?)
    }
}

impl<R: CommandRunner> ZoneOracle for CommandOracle<R> {
    fn list_transitions(&self, zone: &str, cutoff_year: i32) -> Result<Vec<TransitionRecord>> {
        let year = cutoff_year.to_string();
        let output = self
            .runner
            .zdump(zone, cutoff_year)?
            .check(command_line("zdump", &["-v", "-c", &year, zone]))?;

        let grammar = ZdumpGrammar::new(zone)?;
        let mut records = Vec::new();
        for line in output.stdout.lines() {
            let DumpLine::Record(record) = grammar.parse_line(line)? else {
                continue;
            };
            let secs = self.resolve_utc(&record.utc)?;
            records.push(TransitionRecord::new(
                Timestamp::from_secs(secs),
                record.utc_offset,
                record.abbr,
                record.is_dst,
            ));
        }
        Ok(records)
    }

    fn query_offset_and_abbrev(&self, zone: &str, instant: Timestamp) -> Result<ZoneOffset> {
        let secs = instant.trunc_secs();
        let output = self
            .runner
            .date_format(zone, secs)?
            .check(format!("TZ={zone} date --date=@{secs} '+%Z %::z'"))?;
        Ok(parse_zone_designation(first_line(&output.stdout))?)
    }
}

fn first_line(stdout: &str) -> &str {
    stdout.lines().next().unwrap_or_default()
}

/// One zone's history in a [`MockZoneOracle`]
#[derive(Debug, Clone, PartialEq, Eq)]
struct ZoneTable {
    /// In force before the first transition
    base: ZoneOffset,
    transitions: Vec<TransitionRecord>,
}

/// In-memory oracle for tests
#[derive(Debug, Clone, Default)]
pub struct MockZoneOracle {
    zones: BTreeMap<String, ZoneTable>,
}

impl MockZoneOracle {
    /// Create an oracle that knows no zones
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone holding `base` until its first transition
    ///
    /// Transitions are sorted by instant.
    #[must_use]
    pub fn with_zone(
        mut self,
        zone: impl Into<String>,
        base: ZoneOffset,
        mut transitions: Vec<TransitionRecord>,
    ) -> Self {
        transitions.sort_by_key(|t| t.instant);
        self.zones
            .insert(zone.into(), ZoneTable { base, transitions });
        self
    }

    /// Add a zone that has held one offset throughout
    #[must_use]
    pub fn with_fixed_zone(self, zone: impl Into<String>, offset: ZoneOffset) -> Self {
        self.with_zone(zone, offset, Vec::new())
    }

    fn table(&self, zone: &str) -> Result<&ZoneTable> {
        self.zones
            .get(zone)
            .ok_or_else(|| Error::Validation(format!("unknown zone {zone}")))
    }
}

impl ZoneOracle for MockZoneOracle {
    fn list_transitions(&self, zone: &str, cutoff_year: i32) -> Result<Vec<TransitionRecord>> {
        let cutoff = cutoff_instant(cutoff_year)?;
        Ok(self
            .table(zone)?
            .transitions
            .iter()
            .filter(|t| t.instant < cutoff)
            .cloned()
            .collect())
    }

    fn query_offset_and_abbrev(&self, zone: &str, instant: Timestamp) -> Result<ZoneOffset> {
        let table = self.table(zone)?;
        let at = Timestamp::from_secs(instant.trunc_secs());
        Ok(table
            .transitions
            .iter()
            .rev()
            .find(|t| t.instant <= at)
            .map_or_else(|| table.base.clone(), TransitionRecord::zone_offset))
    }
}
