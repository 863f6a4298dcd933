//! JSON export of a suite
//!
//! One flat, ordered assertion stream (the order the HTML harness runs
//! them in) plus per-block counts. Instants are integer milliseconds.

use serde::{Deserialize, Serialize};
use tzjs_gen::{BlockCounts, TestAssertion, TestSuite, Timestamp};

use crate::error::Result;

/// Serializable view of a suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExport {
    /// Ceiling of the tested domain
    pub cutoff_ms: Timestamp,
    /// Assertions per block
    pub counts: BlockCounts,
    /// Every assertion in emission order
    pub assertions: Vec<TestAssertion>,
}

impl From<&TestSuite> for JsonExport {
    fn from(suite: &TestSuite) -> Self {
        Self {
            cutoff_ms: suite.cutoff,
            counts: suite.counts(),
            assertions: suite.assertions().collect(),
        }
    }
}

/// Render a suite as pretty-printed JSON with a trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(suite: &TestSuite) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&JsonExport::from(suite))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzjs_gen::{enumeration_checks, regression_checks};

    fn suite() -> TestSuite {
        let mut suite = TestSuite::new(Timestamp::from_secs(2_524_608_000));
        suite.regression = regression_checks();
        suite.enumeration = enumeration_checks();
        suite
    }

    #[test]
    fn test_export_counts_and_order() {
        let export = JsonExport::from(&suite());
        assert_eq!(export.counts.regression, 5);
        assert_eq!(export.counts.enumeration, 3);
        assert_eq!(export.assertions.len(), 8);
        assert!(matches!(export.assertions[0], TestAssertion::Offset(_)));
        assert!(matches!(export.assertions[7], TestAssertion::Enumeration(_)));
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&suite()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cutoff_ms"], 2_524_608_000_000_i64);
        assert_eq!(value["assertions"][0]["kind"], "offset");
        assert_eq!(value["assertions"][0]["instant_ms"], 1_300_010_399_999_i64);
        assert_eq!(value["assertions"][0]["expected"]["abbr"], "PST");
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_json_parses_back() {
        let json = to_json(&suite()).unwrap();
        let back: JsonExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, JsonExport::from(&suite()));
    }
}
