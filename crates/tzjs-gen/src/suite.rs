//! The ordered regression suite
//!
//! Blocks are emitted in a fixed order: hand-written regression checks,
//! per-zone transition checks (zones in list order), randomized checks,
//! then civil-time enumeration checks.

use serde::{Deserialize, Serialize};

use crate::assertion::{EnumerationAssertion, OffsetAssertion, TestAssertion};
use crate::boundary::EpochProbe;
use crate::timestamp::Timestamp;

/// All transition checks for one zone, in ascending instant order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTransitions {
    /// Zone name
    pub zone: String,
    /// How instant 0 was probed, if it needed synthesizing
    pub epoch_probe: Option<EpochProbe>,
    /// Ordered assertions
    pub assertions: Vec<OffsetAssertion>,
}

impl ZoneTransitions {
    /// True if instants never decrease
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.assertions
            .windows(2)
            .all(|w| w[0].instant <= w[1].instant)
    }
}

/// Number of assertions per block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    /// Hand-written sub-second checks
    pub regression: usize,
    /// Transition-derived checks across all zones
    pub transitions: usize,
    /// Randomized checks
    pub random: usize,
    /// Civil-time enumeration checks
    pub enumeration: usize,
}

impl BlockCounts {
    /// Sum across blocks
    #[must_use]
    pub const fn total(&self) -> usize {
        self.regression + self.transitions + self.random + self.enumeration
    }
}

/// A complete, ordered suite ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Ceiling of the tested domain
    #[serde(rename = "cutoff_ms")]
    pub cutoff: Timestamp,
    /// Block 1
    pub regression: Vec<OffsetAssertion>,
    /// Block 2
    pub transitions: Vec<ZoneTransitions>,
    /// Block 3
    pub random: Vec<OffsetAssertion>,
    /// Block 4
    pub enumeration: Vec<EnumerationAssertion>,
}

impl TestSuite {
    /// Empty suite over `[0, cutoff)`
    #[must_use]
    pub fn new(cutoff: Timestamp) -> Self {
        Self {
            cutoff,
            regression: Vec::new(),
            transitions: Vec::new(),
            random: Vec::new(),
            enumeration: Vec::new(),
        }
    }

    /// Per-block assertion counts
    #[must_use]
    pub fn counts(&self) -> BlockCounts {
        BlockCounts {
            regression: self.regression.len(),
            transitions: self.transitions.iter().map(|z| z.assertions.len()).sum(),
            random: self.random.len(),
            enumeration: self.enumeration.len(),
        }
    }

    /// Every offset assertion (blocks 1-3) in emission order
    pub fn offset_assertions(&self) -> impl Iterator<Item = &OffsetAssertion> {
        self.regression
            .iter()
            .chain(self.transitions.iter().flat_map(|z| z.assertions.iter()))
            .chain(self.random.iter())
    }

    /// The full assertion stream in emission order
    pub fn assertions(&self) -> impl Iterator<Item = TestAssertion> + '_ {
        self.offset_assertions()
            .cloned()
            .map(TestAssertion::from)
            .chain(self.enumeration.iter().cloned().map(TestAssertion::from))
    }

    /// Transition block for `zone`
    #[must_use]
    pub fn zone(&self, zone: &str) -> Option<&ZoneTransitions> {
        self.transitions.iter().find(|z| z.zone == zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::{CivilTime, ZoneOffset};

    fn offset(zone: &str, secs: i64) -> OffsetAssertion {
        OffsetAssertion::new(zone, Timestamp::from_secs(secs), ZoneOffset::new(0, "UTC"))
    }

    fn sample_suite() -> TestSuite {
        let mut suite = TestSuite::new(Timestamp::from_secs(100));
        suite.regression.push(offset("R", 1));
        suite.transitions.push(ZoneTransitions {
            zone: "A".to_string(),
            epoch_probe: None,
            assertions: vec![offset("A", 0), offset("A", 100)],
        });
        suite.transitions.push(ZoneTransitions {
            zone: "B".to_string(),
            epoch_probe: Some(EpochProbe::Resolved),
            assertions: vec![offset("B", 0), offset("B", 100)],
        });
        suite.random.push(offset("B", 42));
        suite
            .enumeration
            .push(EnumerationAssertion::new("E", CivilTime::new(2011, 1, 1, 0, 0, 0)));
        suite
    }

    #[test]
    fn test_counts() {
        let counts = sample_suite().counts();
        assert_eq!(counts.regression, 1);
        assert_eq!(counts.transitions, 4);
        assert_eq!(counts.random, 1);
        assert_eq!(counts.enumeration, 1);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_assertion_stream_order() {
        let suite = sample_suite();
        let zones: Vec<String> = suite.assertions().map(|a| a.zone().to_string()).collect();
        assert_eq!(zones, vec!["R", "A", "A", "B", "B", "B", "E"]);
    }

    #[test]
    fn test_zone_lookup() {
        let suite = sample_suite();
        assert_eq!(
            suite.zone("B").unwrap().epoch_probe,
            Some(EpochProbe::Resolved)
        );
        assert!(suite.zone("C").is_none());
    }

    #[test]
    fn test_is_ordered() {
        let mut zt = sample_suite().transitions.remove(0);
        assert!(zt.is_ordered());
        zt.assertions.reverse();
        assert!(!zt.is_ordered());
    }
}
