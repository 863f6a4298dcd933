//! Example: How each zone's epoch assertion is chosen
//!
//! Builds four synthetic zones, one per probe kind, and prints the
//! transition assertions the extractor derives for them.
//!
//! Run with: `cargo run --example epoch_probes -p tzjs-runner`

#![allow(clippy::unwrap_used)]

use tzjs_gen::{Timestamp, TransitionRecord, ZoneOffset};
use tzjs_runner::{MockZoneOracle, TransitionExtractor};

fn record(secs: i64, offset: i32, abbr: &str, is_dst: bool) -> TransitionRecord {
    TransitionRecord::new(Timestamp::from_secs(secs), offset, abbr, is_dst)
}

fn main() {
    let lmt = ZoneOffset::new(-28378, "LMT");
    let oracle = MockZoneOracle::new()
        .with_zone(
            "Demo/PreviousSegment",
            lmt.clone(),
            vec![
                record(-2_717_640_000, -28800, "PST", false),
                record(1_300_010_400, -25200, "PDT", true),
                record(1_320_570_000, -28800, "PST", false),
            ],
        )
        .with_zone(
            "Demo/OwnSegment",
            lmt.clone(),
            vec![record(504_901_800, 20700, "+0545", false)],
        )
        .with_zone(
            "Demo/TrailingSegment",
            lmt,
            vec![record(-1_577_923_200, 3600, "CET", false)],
        )
        .with_fixed_zone("Demo/Resolved", ZoneOffset::new(0, "UTC"));

    let extractor = TransitionExtractor::new(&oracle, 2050).unwrap();
    println!("cutoff: {}", extractor.cutoff());

    for zone in [
        "Demo/PreviousSegment",
        "Demo/OwnSegment",
        "Demo/TrailingSegment",
        "Demo/Resolved",
    ] {
        let transitions = extractor.extract(zone).unwrap();
        println!();
        println!("{zone} ({:?})", transitions.epoch_probe);
        for assertion in &transitions.assertions {
            println!(
                "  {:>14}  {:>6}  {}",
                assertion.instant.to_string(),
                assertion.expected.offset,
                assertion.expected.abbr
            );
        }
    }
}
