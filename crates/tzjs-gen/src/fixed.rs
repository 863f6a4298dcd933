//! Hand-written checks bracketing the generated blocks
//!
//! The regression checks use non-round instants, since nearly everything
//! mined from `zdump` falls on whole seconds. The last two sit around the
//! 2049 fall-back in Los Angeles and may need revisiting if US DST rules
//! change.

use crate::assertion::{CivilTime, EnumerationAssertion, OffsetAssertion, ZoneOffset};
use crate::timestamp::Timestamp;

const LOS_ANGELES: &str = "America/Los_Angeles";

/// Block 1: sub-second checks at and near known transitions
#[must_use]
pub fn regression_checks() -> Vec<OffsetAssertion> {
    [
        (1_300_010_399_999, -28800, "PST"),
        (1_300_010_400_001, -25200, "PDT"),
        (1_308_469_553_734, -25200, "PDT"),
        (2_519_888_399_999, -25200, "PDT"),
        (2_519_888_400_001, -28800, "PST"),
    ]
    .into_iter()
    .map(|(millis, offset, abbr)| {
        OffsetAssertion::new(
            LOS_ANGELES,
            Timestamp::from_millis(millis),
            ZoneOffset::new(offset, abbr),
        )
    })
    .collect()
}

/// Block 4: `datesFor` checks for a plain time, a gap and an overlap
#[must_use]
pub fn enumeration_checks() -> Vec<EnumerationAssertion> {
    vec![
        EnumerationAssertion::new(LOS_ANGELES, CivilTime::new(2011, 1, 1, 0, 0, 0)).with_result(
            -28800,
            "PST",
            Timestamp::from_secs(1_293_868_800),
        ),
        // Spring forward: 02:30 never happens
        EnumerationAssertion::new(LOS_ANGELES, CivilTime::new(2011, 3, 13, 2, 30, 0)),
        // Fall back: 01:30 happens twice
        EnumerationAssertion::new(LOS_ANGELES, CivilTime::new(2011, 11, 6, 1, 30, 0))
            .with_result(-25200, "PDT", Timestamp::from_secs(1_320_568_200))
            .with_result(-28800, "PST", Timestamp::from_secs(1_320_571_800)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_checks_straddle_transition() {
        let checks = regression_checks();
        assert_eq!(checks.len(), 5);
        assert_eq!(checks[0].instant.to_string(), "1300010399.999");
        assert_eq!(checks[0].expected, ZoneOffset::new(-28800, "PST"));
        assert_eq!(checks[1].instant.to_string(), "1300010400.001");
        assert_eq!(checks[1].expected, ZoneOffset::new(-25200, "PDT"));
        assert!(checks[0].instant < checks[1].instant);
    }

    #[test]
    fn test_regression_checks_far_future() {
        let checks = regression_checks();
        assert!(checks[3..].iter().all(|c| c.instant.trunc_secs() > 2_500_000_000));
    }

    #[test]
    fn test_enumeration_gap_is_empty() {
        let checks = enumeration_checks();
        let gap = &checks[1];
        assert_eq!(gap.civil, CivilTime::new(2011, 3, 13, 2, 30, 0));
        assert!(gap.results.is_empty());
    }

    #[test]
    fn test_enumeration_overlap_is_chronological() {
        let checks = enumeration_checks();
        let overlap = &checks[2];
        assert_eq!(overlap.results.len(), 2);
        assert!(overlap.is_chronological());
        assert_eq!(overlap.results[0].expected, ZoneOffset::new(-25200, "PDT"));
        assert_eq!(overlap.results[0].instant, Timestamp::from_secs(1_320_568_200));
        assert_eq!(overlap.results[1].expected, ZoneOffset::new(-28800, "PST"));
        assert_eq!(overlap.results[1].instant, Timestamp::from_secs(1_320_571_800));
    }

    #[test]
    fn test_enumeration_plain_time_single() {
        let checks = enumeration_checks();
        assert_eq!(checks[0].results.len(), 1);
    }
}
