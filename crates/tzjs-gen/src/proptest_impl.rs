//! Proptest strategies for property-based testing
//!
//! Strategies produce realistic zone names, offsets and ascending
//! transition streams straddling the epoch.

use crate::assertion::ZoneOffset;
use crate::boundary::TransitionRecord;
use crate::timestamp::{DEFAULT_CUTOFF_SECS, Timestamp};
use proptest::prelude::*;

/// Strategy for zone names
pub fn zone_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "America/Los_Angeles",
        "America/Sao_Paulo",
        "Europe/London",
        "Europe/Paris",
        "Asia/Kathmandu",
        "Australia/Lord_Howe",
        "Pacific/Johnston",
        "Etc/GMT+5",
    ])
    .prop_map(String::from)
}

/// Strategy for offsets in the real-world range, with plausible abbreviations
pub fn zone_offset_strategy() -> impl Strategy<Value = ZoneOffset> {
    (
        -12 * 3600..=14 * 3600i32,
        prop::sample::select(vec!["LMT", "UTC", "PST", "PDT", "CET", "CEST", "+0545", "-03"]),
    )
        .prop_map(|(offset, abbr)| ZoneOffset::new(offset, abbr))
}

/// Strategy for instants inside the default domain
pub fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (0..DEFAULT_CUTOFF_SECS * 1000).prop_map(Timestamp::from_millis)
}

/// Strategy for a strictly ascending transition stream of whole-second
/// instants from ~1800 up to the default cutoff
pub fn transition_stream_strategy() -> impl Strategy<Value = Vec<TransitionRecord>> {
    prop::collection::btree_set(-5_364_662_400i64..DEFAULT_CUTOFF_SECS, 0..40).prop_flat_map(
        |instants| {
            let len = instants.len();
            (
                Just(instants),
                prop::collection::vec(zone_offset_strategy(), len),
                prop::collection::vec(any::<bool>(), len),
            )
        },
    )
    .prop_map(|(instants, offsets, dst)| {
        instants
            .into_iter()
            .zip(offsets)
            .zip(dst)
            .map(|((secs, zo), is_dst)| {
                TransitionRecord::new(Timestamp::from_secs(secs), zo.offset, zo.abbr, is_dst)
            })
            .collect()
    })
}
