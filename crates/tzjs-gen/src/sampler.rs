//! Randomized (zone, instant) sampling plan
//!
//! Each sample consumes exactly three draws: one picks the zone, one
//! places the instant coarsely across the whole domain, and one adds
//! sub-second spread down to the millisecond. The sum is reduced modulo
//! the domain length and floored to milliseconds. Samples are never
//! rejected or redrawn, so the whole plan is a function of the seed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prng::LcgSequence;
use crate::timestamp::Timestamp;

/// Number of randomized assertions in a standard suite
pub const RANDOM_SAMPLE_COUNT: usize = 50_000;

/// The fine draw spans `2^32` milliseconds
const TWO_POW_32: f64 = 4_294_967_296.0;

/// One randomized test point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Index into the zone list
    pub zone_index: usize,
    /// Instant in `[0, cutoff)`
    pub instant: Timestamp,
}

/// Sole owner of the run's PRNG state while sampling
#[derive(Debug, Clone)]
pub struct RandomSampler {
    prng: LcgSequence,
    zone_count: usize,
    domain_secs: f64,
}

impl RandomSampler {
    /// Sample `zone_count` zones over `[0, cutoff)`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneList`] when `zone_count` is zero and
    /// [`Error::EmptyDomain`] when `cutoff` is less than a second past the
    /// epoch.
    pub fn new(prng: LcgSequence, zone_count: usize, cutoff: Timestamp) -> Result<Self> {
        if zone_count == 0 {
            return Err(Error::InvalidZoneList(
                "cannot sample an empty zone list".to_string(),
            ));
        }
        if cutoff.trunc_secs() <= 0 {
            return Err(Error::EmptyDomain(cutoff));
        }
        Ok(Self {
            prng,
            zone_count,
            domain_secs: cutoff.trunc_secs() as f64,
        })
    }

    /// Draw the next sample
    pub fn next_sample(&mut self) -> Sample {
        let zone_index = ((self.prng.draw() * self.zone_count as f64) as usize)
            .min(self.zone_count - 1);

        let coarse = self.prng.draw() * self.domain_secs;
        let fine = self.prng.draw() * TWO_POW_32 / 1000.0;
        let secs = (coarse + fine) % self.domain_secs;
        let millis = (secs * 1000.0).floor() as i64;

        Sample {
            zone_index,
            instant: Timestamp::from_millis(millis),
        }
    }

    /// PRNG state the next sample will start from
    #[must_use]
    pub fn prng(&self) -> &LcgSequence {
        &self.prng
    }
}

impl Iterator for RandomSampler {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::DEFAULT_CUTOFF_SECS;

    fn sampler(zones: usize) -> RandomSampler {
        RandomSampler::new(
            LcgSequence::new(),
            zones,
            Timestamp::from_secs(DEFAULT_CUTOFF_SECS),
        )
        .unwrap()
    }

    #[test]
    fn test_first_samples_fixed() {
        let samples: Vec<Sample> = sampler(7).take(3).collect();
        assert_eq!(
            samples,
            vec![
                Sample {
                    zone_index: 3,
                    instant: Timestamp::from_millis(87_876_562_305),
                },
                Sample {
                    zone_index: 6,
                    instant: Timestamp::from_millis(660_670_573_646),
                },
                Sample {
                    zone_index: 1,
                    instant: Timestamp::from_millis(1_068_718_166_616),
                },
            ]
        );
    }

    #[test]
    fn test_three_draws_per_sample() {
        let mut s = sampler(3);
        s.next_sample();
        let mut expected = LcgSequence::new();
        for _ in 0..3 {
            expected.draw();
        }
        assert_eq!(s.prng(), &expected);
    }

    #[test]
    fn test_zone_index_depends_on_zone_count() {
        assert_eq!(sampler(3).next_sample().zone_index, 1);
        assert_eq!(sampler(1).next_sample().zone_index, 0);
    }

    #[test]
    fn test_instants_within_domain() {
        let cutoff = Timestamp::from_secs(DEFAULT_CUTOFF_SECS);
        for sample in sampler(5).take(10_000) {
            assert!(sample.instant >= Timestamp::EPOCH);
            assert!(sample.instant < cutoff);
            assert!(sample.zone_index < 5);
        }
    }

    #[test]
    fn test_zone_selection_roughly_uniform() {
        let zones = 7;
        let mut counts = vec![0usize; zones];
        for sample in sampler(zones).take(RANDOM_SAMPLE_COUNT) {
            counts[sample.zone_index] += 1;
        }
        let expected = RANDOM_SAMPLE_COUNT / zones;
        for count in counts {
            let deviation = count.abs_diff(expected) as f64 / expected as f64;
            assert!(deviation < 0.05, "zone count {count} far from {expected}");
        }
    }

    #[test]
    fn test_small_domain_wraps() {
        // The fine draw alone spans ~50 days, far beyond this domain
        let cutoff = Timestamp::from_secs(1_000);
        for sample in RandomSampler::new(LcgSequence::new(), 2, cutoff).unwrap().take(1000) {
            assert!(sample.instant < cutoff);
        }
    }

    #[test]
    fn test_empty_zone_list_rejected() {
        let err = RandomSampler::new(LcgSequence::new(), 0, Timestamp::from_secs(10)).unwrap_err();
        assert!(matches!(err, Error::InvalidZoneList(_)));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let err = RandomSampler::new(LcgSequence::new(), 3, Timestamp::from_millis(999)).unwrap_err();
        assert!(matches!(err, Error::EmptyDomain(_)));
    }
}
