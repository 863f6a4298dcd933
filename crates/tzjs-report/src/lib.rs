//! tz.js Report Renderer
//!
//! Turns a [`tzjs_gen::TestSuite`] into its published form: a
//! self-contained HTML page whose script runs every assertion against
//! tz.js and prints a pass/fail summary, or a JSON export of the same
//! ordered stream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::format_push_string)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::redundant_clone))]
#![cfg_attr(test, allow(clippy::uninlined_format_args))]

pub mod error;
pub mod format;
pub mod html;
pub mod json;

pub use error::{Error, Result};
pub use format::{ReportFormat, report_digest, write_report};
pub use html::HarnessReport;
pub use json::{JsonExport, to_json};
