//! Per-zone transition extraction
//!
//! Pulls a zone's transitions from the oracle and folds them through the
//! boundary policy. Zones that dump no transitions at all fall back to
//! asking the oracle what held at the epoch.

use tracing::{debug, info};
use tzjs_gen::{SegmentTracker, Timestamp, ZoneTransitions, cutoff_instant};

use crate::error::Result;
use crate::oracle::ZoneOracle;

/// Turns one zone's history into its ordered transition assertions
#[derive(Debug, Clone)]
pub struct TransitionExtractor<O> {
    oracle: O,
    cutoff_year: i32,
    cutoff: Timestamp,
}

impl<O: ZoneOracle> TransitionExtractor<O> {
    /// Extract against `oracle` up to the start of `cutoff_year`
    ///
    /// # Errors
    ///
    /// Returns an error if `cutoff_year` is not after 1970.
    pub fn new(oracle: O, cutoff_year: i32) -> Result<Self> {
        Ok(Self {
            oracle,
            cutoff_year,
            cutoff: cutoff_instant(cutoff_year)?,
        })
    }

    /// Ceiling of the tested domain
    #[must_use]
    pub fn cutoff(&self) -> Timestamp {
        self.cutoff
    }

    /// The oracle extraction runs against
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Ordered assertions for `zone`
    ///
    /// # Errors
    ///
    /// Any oracle failure is returned as is; nothing is emitted for a zone
    /// whose history could not be read completely.
    pub fn extract(&self, zone: &str) -> Result<ZoneTransitions> {
        let records = self.oracle.list_transitions(zone, self.cutoff_year)?;

        let mut tracker = SegmentTracker::new(zone, self.cutoff);
        for record in &records {
            tracker.push(record);
        }

        let transitions = tracker.finish_with(|| {
            info!(zone, "no transitions, resolving epoch offset from oracle");
            self.oracle.query_offset_and_abbrev(zone, Timestamp::EPOCH)
        })?;

        debug!(
            zone,
            records = records.len(),
            assertions = transitions.assertions.len(),
            probe = ?transitions.epoch_probe,
            "extracted transitions"
        );
        Ok(transitions)
    }
}
