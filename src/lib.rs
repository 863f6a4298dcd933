//! tz.js regression suite generator
//!
//! Facade over the workspace crates:
//!
//! - [`generator`]: timestamps, PRNG, output grammars, boundary policy and
//!   the ordered suite
//! - [`runner`]: the zdump/date reference oracle and orchestration
//! - [`report`]: the HTML harness and JSON export
//!
//! The `tzjs-tests` binary lives in the `tzjs-cli` crate.

#![forbid(unsafe_code)]

pub use tzjs_gen as generator;
pub use tzjs_report as report;
pub use tzjs_runner as runner;
