//! Epoch and cutoff boundary policy for one zone's transitions
//!
//! The tested domain is `[0, cutoff)`. Transitions before the epoch are
//! not emitted, but the segment they open is remembered so that the offset
//! in force at instant 0 can be asserted. After the last transition the
//! final segment is asserted once more at the cutoff.
//!
//! How instant 0 is probed depends on what preceded the first retained
//! transition, see [`EpochProbe`].

use serde::{Deserialize, Serialize};

use crate::assertion::{OffsetAssertion, ZoneOffset};
use crate::suite::ZoneTransitions;
use crate::timestamp::Timestamp;

/// One offset-changing transition as reported by the dump tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Instant the new segment starts
    pub instant: Timestamp,
    /// Seconds east of UTC from `instant` on
    pub utc_offset: i32,
    /// Abbreviation from `instant` on
    pub abbr: String,
    /// Daylight-saving flag
    pub is_dst: bool,
}

impl TransitionRecord {
    /// Create a transition record
    #[must_use]
    pub fn new(instant: Timestamp, utc_offset: i32, abbr: impl Into<String>, is_dst: bool) -> Self {
        Self {
            instant,
            utc_offset,
            abbr: abbr.into(),
            is_dst,
        }
    }

    /// Offset and abbreviation of the segment this transition opens
    #[must_use]
    pub fn zone_offset(&self) -> ZoneOffset {
        ZoneOffset::new(self.utc_offset, self.abbr.clone())
    }
}

/// Which segment the synthetic instant-0 assertion was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochProbe {
    /// A pre-epoch transition existed: the segment it opened holds at 0
    PreviousSegment,
    /// The very first transition is after 0: its own offset is taken to
    /// have held since before recorded history
    OwnSegment,
    /// Every transition is pre-epoch: the last one's segment holds at 0
    TrailingSegment,
    /// No transitions at all: the value was resolved by the oracle
    Resolved,
}

/// Folds a zone's transition stream into its ordered assertions
#[derive(Debug, Clone)]
pub struct SegmentTracker {
    zone: String,
    cutoff: Timestamp,
    previous: Option<ZoneOffset>,
    seen_retained: bool,
    probe: Option<EpochProbe>,
    assertions: Vec<OffsetAssertion>,
}

impl SegmentTracker {
    /// Start tracking `zone` over `[0, cutoff)`
    #[must_use]
    pub fn new(zone: impl Into<String>, cutoff: Timestamp) -> Self {
        Self {
            zone: zone.into(),
            cutoff,
            previous: None,
            seen_retained: false,
            probe: None,
            assertions: Vec::new(),
        }
    }

    /// True until the first record has been pushed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous.is_none()
    }

    /// Probe chosen so far
    #[must_use]
    pub fn epoch_probe(&self) -> Option<EpochProbe> {
        self.probe
    }

    /// Feed the next transition (records arrive in ascending order)
    pub fn push(&mut self, record: &TransitionRecord) {
        let own = record.zone_offset();

        if !record.instant.is_negative() {
            if !self.seen_retained {
                match self.previous.clone() {
                    Some(previous) if record.instant != Timestamp::EPOCH => {
                        self.emit(Timestamp::EPOCH, previous);
                        self.probe = Some(EpochProbe::PreviousSegment);
                    }
                    None if record.instant > Timestamp::EPOCH => {
                        self.emit(Timestamp::EPOCH, own.clone());
                        self.probe = Some(EpochProbe::OwnSegment);
                    }
                    // A transition exactly at 0 asserts the epoch itself.
                    _ => {}
                }
                self.seen_retained = true;
            }
            self.emit(record.instant, own.clone());
        }

        self.previous = Some(own);
    }

    /// Close the final segment at the cutoff
    ///
    /// `resolve_epoch` is only called when no record was ever pushed; it
    /// supplies the single offset the zone has held throughout.
    ///
    /// # Errors
    ///
    /// Propagates the error from `resolve_epoch`.
    pub fn finish_with<E>(
        mut self,
        resolve_epoch: impl FnOnce() -> std::result::Result<ZoneOffset, E>,
    ) -> std::result::Result<ZoneTransitions, E> {
        let (last, resolved) = match self.previous.take() {
            Some(last) => (last, false),
            None => (resolve_epoch()?, true),
        };

        if !self.seen_retained {
            self.emit(Timestamp::EPOCH, last.clone());
            self.probe = Some(if resolved {
                EpochProbe::Resolved
            } else {
                EpochProbe::TrailingSegment
            });
        }
        self.emit(self.cutoff, last);

        Ok(ZoneTransitions {
            zone: self.zone,
            epoch_probe: self.probe,
            assertions: self.assertions,
        })
    }

    fn emit(&mut self, instant: Timestamp, expected: ZoneOffset) {
        self.assertions
            .push(OffsetAssertion::new(self.zone.clone(), instant, expected));
    }
}
