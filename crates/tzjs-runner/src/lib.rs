//! tz.js Reference Runner
//!
//! Backs the generator with real ground truth: `zdump` for each zone's
//! transition history and `date` for the offset in force at an instant.
//! Both sit behind the [`ZoneOracle`] capability so the whole pipeline can
//! run against in-memory tables in tests.
//!
//! Execution is strictly sequential. Every external call blocks, and any
//! failure aborts the run: a partial suite is never produced.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::redundant_clone))]
#![cfg_attr(test, allow(clippy::uninlined_format_args))]

pub mod command;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod oracle;

pub use command::{CommandOutput, CommandRunner, MockCommandRunner, RealCommandRunner};
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use extractor::TransitionExtractor;
pub use generator::{Orchestrator, PROGRESS_INTERVAL};
pub use oracle::{CommandOracle, MockZoneOracle, ZoneOracle};
