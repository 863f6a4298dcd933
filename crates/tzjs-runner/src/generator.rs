//! Suite orchestration
//!
//! Builds the four blocks in order. The PRNG is moved into the sampling
//! loop, which is its only user; samples are drawn and resolved one at a
//! time.

use tracing::{debug, info};
use tzjs_gen::{
    LcgSequence, OffsetAssertion, RandomSampler, TestSuite, Timestamp, ZoneList, ZoneTransitions,
    enumeration_checks, regression_checks,
};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::extractor::TransitionExtractor;
use crate::oracle::ZoneOracle;

/// Samples between progress log lines
pub const PROGRESS_INTERVAL: usize = 5000;

/// Drives extraction and sampling against one oracle
#[derive(Debug)]
pub struct Orchestrator<O> {
    extractor: TransitionExtractor<O>,
    prng: LcgSequence,
    sample_count: usize,
}

impl<O: ZoneOracle> Orchestrator<O> {
    /// Create from a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured cutoff year is not after 1970.
    pub fn new(oracle: O, config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            extractor: TransitionExtractor::new(oracle, config.cutoff_year)?,
            prng: config.prng(),
            sample_count: config.sample_count,
        })
    }

    /// Override the number of randomized assertions
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Ceiling of the tested domain
    #[must_use]
    pub fn cutoff(&self) -> Timestamp {
        self.extractor.cutoff()
    }

    /// Build the complete suite over `zones`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if samples are requested from an empty
    /// zone list, otherwise the first oracle failure.
    pub fn generate(self, zones: &ZoneList) -> Result<TestSuite> {
        if zones.is_empty() && self.sample_count > 0 {
            return Err(Error::Validation(
                "cannot draw random samples from an empty zone list".to_string(),
            ));
        }
        info!(
            zones = zones.len(),
            samples = self.sample_count,
            cutoff = %self.cutoff(),
            "generating suite"
        );

        let mut suite = TestSuite::new(self.cutoff());
        suite.regression = regression_checks();
        suite.transitions = self.transition_block(zones)?;
        suite.random = self.random_block(zones)?;
        suite.enumeration = enumeration_checks();

        let counts = suite.counts();
        info!(
            regression = counts.regression,
            transitions = counts.transitions,
            random = counts.random,
            enumeration = counts.enumeration,
            "suite complete"
        );
        Ok(suite)
    }

    /// Block 2: each zone's transitions, in list order
    ///
    /// # Errors
    ///
    /// Returns the first extraction failure.
    pub fn transition_block(&self, zones: &ZoneList) -> Result<Vec<ZoneTransitions>> {
        zones
            .iter()
            .map(|zone| self.extractor.extract(zone))
            .collect()
    }

    /// Block 3: consumes the PRNG
    fn random_block(self, zones: &ZoneList) -> Result<Vec<OffsetAssertion>> {
        if self.sample_count == 0 {
            return Ok(Vec::new());
        }
        let oracle = self.extractor.oracle();
        let sampler = RandomSampler::new(self.prng, zones.len(), self.extractor.cutoff())?;

        let mut assertions = Vec::with_capacity(self.sample_count);
        for (done, sample) in (1..).zip(sampler.take(self.sample_count)) {
            let zone = zones.get(sample.zone_index).ok_or_else(|| {
                Error::Validation(format!("sample index {} out of range", sample.zone_index))
            })?;
            let expected = oracle.query_offset_and_abbrev(zone, sample.instant)?;
            assertions.push(OffsetAssertion::new(zone, sample.instant, expected));

            if done % PROGRESS_INTERVAL == 0 {
                info!(done, total = self.sample_count, "sampling");
            }
        }
        debug!(samples = assertions.len(), "random block complete");
        Ok(assertions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandRunner;
    use crate::oracle::{CommandOracle, MockZoneOracle};
    use tzjs_gen::{DEFAULT_CUTOFF_SECS, EpochProbe, TransitionRecord, ZoneOffset};

    fn oracle() -> MockZoneOracle {
        MockZoneOracle::new()
            .with_zone(
                "America/Los_Angeles",
                ZoneOffset::new(-28378, "LMT"),
                vec![
                    TransitionRecord::new(Timestamp::from_secs(-2_717_640_000), -28800, "PST", false),
                    TransitionRecord::new(Timestamp::from_secs(1_300_010_400), -25200, "PDT", true),
                    TransitionRecord::new(Timestamp::from_secs(1_320_570_000), -28800, "PST", false),
                ],
            )
            .with_fixed_zone("Pacific/Johnston", ZoneOffset::new(-36000, "HST"))
    }

    fn zones() -> ZoneList {
        ZoneList::from_names(["America/Los_Angeles", "Pacific/Johnston"]).unwrap()
    }

    fn config(samples: usize) -> GeneratorConfig {
        GeneratorConfig {
            sample_count: samples,
            ..GeneratorConfig::default()
        }
    }

    fn generate(samples: usize) -> TestSuite {
        Orchestrator::new(oracle(), &config(samples))
            .unwrap()
            .generate(&zones())
            .unwrap()
    }

    #[test]
    fn test_block_order_and_counts() {
        let suite = generate(200);
        let counts = suite.counts();
        assert_eq!(counts.regression, 5);
        assert_eq!(counts.transitions, 4 + 2);
        assert_eq!(counts.random, 200);
        assert_eq!(counts.enumeration, 3);
        assert_eq!(suite.transitions[0].zone, "America/Los_Angeles");
        assert_eq!(suite.transitions[1].zone, "Pacific/Johnston");
        assert_eq!(suite.cutoff, Timestamp::from_secs(DEFAULT_CUTOFF_SECS));
    }

    #[test]
    fn test_degenerate_zone_in_suite() {
        let suite = generate(0);
        let johnston = suite.zone("Pacific/Johnston").unwrap();
        assert_eq!(johnston.epoch_probe, Some(EpochProbe::Resolved));
        assert_eq!(johnston.assertions.len(), 2);
    }

    #[test]
    fn test_first_random_sample() {
        let suite = generate(1);
        let first = &suite.random[0];
        assert_eq!(first.zone, "America/Los_Angeles");
        assert_eq!(first.instant, Timestamp::from_millis(87_876_562_305));
        assert_eq!(first.expected, ZoneOffset::new(-28800, "PST"));
    }

    #[test]
    fn test_random_samples_resolved_by_oracle() {
        let suite = generate(500);
        let oracle = oracle();
        for assertion in &suite.random {
            assert!(assertion.instant >= Timestamp::EPOCH);
            assert!(assertion.instant < suite.cutoff);
            let expected = oracle
                .query_offset_and_abbrev(&assertion.zone, assertion.instant)
                .unwrap();
            assert_eq!(assertion.expected, expected);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate(300), generate(300));
    }

    #[test]
    fn test_seed_changes_random_block() {
        let reseeded = GeneratorConfig {
            seed: 7,
            ..config(50)
        };
        let other = Orchestrator::new(oracle(), &reseeded)
            .unwrap()
            .generate(&zones())
            .unwrap();
        let standard = generate(50);
        assert_eq!(other.transitions, standard.transitions);
        assert_ne!(other.random, standard.random);
    }

    #[test]
    fn test_with_sample_count() {
        let suite = Orchestrator::new(oracle(), &config(10))
            .unwrap()
            .with_sample_count(3)
            .generate(&zones())
            .unwrap();
        assert_eq!(suite.random.len(), 3);
    }

    #[test]
    fn test_empty_zone_list() {
        let err = Orchestrator::new(oracle(), &config(10))
            .unwrap()
            .generate(&ZoneList::default())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let suite = Orchestrator::new(oracle(), &config(0))
            .unwrap()
            .generate(&ZoneList::default())
            .unwrap();
        assert_eq!(suite.counts().total(), 5 + 3);
    }

    #[test]
    fn test_oracle_failure_aborts() {
        let runner = MockCommandRunner::new()
            .with_dump("Etc/UTC", "Etc/UTC  -9223372036854775808 = NULL\n")
            .with_date_failure();
        let zones = ZoneList::from_names(["Etc/UTC"]).unwrap();
        let err = Orchestrator::new(CommandOracle::new(runner), &config(10))
            .unwrap()
            .generate(&zones)
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[test]
    fn test_transition_block_alone() {
        let orchestrator = Orchestrator::new(oracle(), &config(0)).unwrap();
        let block = orchestrator.transition_block(&zones()).unwrap();
        assert_eq!(block.len(), 2);
        assert!(block.iter().all(ZoneTransitions::is_ordered));
    }
}
