//! tz.js Regression Point Generator
//!
//! Pure, process-free building blocks for the tz.js regression suite:
//! exact millisecond timestamps, the fixed-seed linear congruential
//! sequence, the grammars for `zdump` and `date` output, the epoch/cutoff
//! boundary policy, the randomized sampling plan, and the ordered
//! [`TestSuite`] that the report crate renders.
//!
//! # Reproducibility
//!
//! Every value produced here is a function of its inputs and the fixed
//! PRNG constants. Two runs against the same tz database produce
//! byte-identical suites.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::redundant_clone))]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod assertion;
pub mod boundary;
pub mod error;
pub mod fixed;
pub mod grammar;
pub mod prng;
pub mod proptest_impl;
pub mod sampler;
pub mod suite;
pub mod timestamp;
pub mod zones;

pub use assertion::{
    CivilTime, EnumerationAssertion, EnumerationResult, OffsetAssertion, TestAssertion,
    ZoneOffset,
};
pub use boundary::{EpochProbe, SegmentTracker, TransitionRecord};
pub use error::{Error, Result};
pub use fixed::{enumeration_checks, regression_checks};
pub use grammar::{DumpLine, DumpRecord, ZdumpGrammar, parse_epoch_seconds, parse_zone_designation};
pub use prng::{INCREMENT, LcgSequence, MULTIPLIER, SEED};
pub use sampler::{RANDOM_SAMPLE_COUNT, RandomSampler, Sample};
pub use suite::{BlockCounts, TestSuite, ZoneTransitions};
pub use timestamp::{DEFAULT_CUTOFF_SECS, DEFAULT_CUTOFF_YEAR, Timestamp, cutoff_instant};
pub use zones::ZoneList;
