//! Executable HTML harness
//!
//! The page loads tz.js, defines a tiny assertion harness with pass/fail
//! counters, runs every assertion of the suite in order and prints a
//! totals line. Failures are only counted when the page runs in a
//! browser; rendering never evaluates anything.

use std::io::Write;

use tzjs_gen::{EnumerationAssertion, OffsetAssertion, TestSuite};

use crate::error::Result;

/// Harness helpers: `print`, `assert`, `is` and `check_offset`
const HARNESS_SCRIPT: &str = r#"var output_node = document.createTextNode("");
document.getElementById("output").appendChild(output_node);
function print(s)
{
    output_node.appendData(s + "\n");
}

var pass_count = 0, fail_count = 0;

function assert(cond, description)
{
    if (cond) {
        ++pass_count;
    } else {
        ++fail_count;
        print("FAIL: " + description);
    }
}

function is(value, expected, description)
{
    assert(value == expected,
           description + ":  " + value + " should equal " + expected);
}

function check_offset(zone, d, utcoff, abbr)
{
    var z = tz.zoneAt(zone, new Date(d * 1000));
    is(z.offset, utcoff, zone + " at " + d);
    is(z.abbr, abbr, zone + " at " + d);
}
"#;

const TOTALS_LINE: &str =
    r#"print("Totals:  " + pass_count + " passed, " + fail_count + " failed.");"#;

/// HTML harness generator
#[derive(Debug, Clone)]
pub struct HarnessReport {
    /// Name shown in the page title
    generator: String,
    /// Script URL of the library under test
    library_src: String,
}

impl Default for HarnessReport {
    fn default() -> Self {
        Self::new()
    }
}

impl HarnessReport {
    /// Harness loading `tz.js` from the same directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator: "tzjs-tests".to_string(),
            library_src: "tz.js".to_string(),
        }
    }

    /// Set the generator name in the title
    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Load the library from another URL
    #[must_use]
    pub fn with_library_src(mut self, library_src: impl Into<String>) -> Self {
        self.library_src = library_src.into();
        self
    }

    /// Render the page
    ///
    /// # Errors
    ///
    /// Returns an error if a string literal cannot be encoded.
    pub fn generate(&self, suite: &TestSuite) -> Result<String> {
        let mut output = Vec::new();
        self.write_html(&mut output, suite)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    /// Write the page to a writer
    fn write_html<W: Write>(&self, w: &mut W, suite: &TestSuite) -> Result<()> {
        writeln!(w, "<!DOCTYPE HTML>")?;
        writeln!(w, "<title>tz.js tests (generated by {})</title>", self.generator)?;
        writeln!(w, r#"<script src="{}"></script>"#, self.library_src)?;
        writeln!(w, r#"<pre id="output"></pre>"#)?;
        writeln!(w, "<script>")?;
        w.write_all(HARNESS_SCRIPT.as_bytes())?;

        writeln!(w)?;
        block_comment(
            w,
            &[
                "Instants off the whole second around known transitions, since",
                "nearly everything generated below is whole seconds.",
                "",
                "The last two assume US daylight saving rules stay as they are.",
            ],
        )?;
        for assertion in &suite.regression {
            write_check_offset(w, assertion)?;
        }

        writeln!(w)?;
        block_comment(
            w,
            &[
                "Every transition zdump reports for each zone, plus the epoch",
                "and the cutoff.",
            ],
        )?;
        for zone in &suite.transitions {
            for assertion in &zone.assertions {
                write_check_offset(w, assertion)?;
            }
        }

        writeln!(w)?;
        block_comment(
            w,
            &[
                "Random zones and instants from a fixed-seed linear congruential",
                "generator (Numerical Recipes constants), so the same points are",
                "checked on every regeneration.",
            ],
        )?;
        for assertion in &suite.random {
            write_check_offset(w, assertion)?;
        }

        writeln!(w)?;
        block_comment(w, &["Fixed checks for window.tz.datesFor"])?;
        for (index, assertion) in (1..).zip(&suite.enumeration) {
            write_dates_for(w, index, assertion)?;
        }

        writeln!(w)?;
        writeln!(w, "{TOTALS_LINE}")?;
        writeln!(w, "</script>")?;
        Ok(())
    }
}

/// Encode a JavaScript string literal
fn js_string(s: &str) -> Result<String> {
    Ok(serde_json::to_string(s)?)
}

fn block_comment<W: Write>(w: &mut W, lines: &[&str]) -> Result<()> {
    writeln!(w, "/*")?;
    for line in lines {
        if line.is_empty() {
            writeln!(w, " *")?;
        } else {
            writeln!(w, " * {line}")?;
        }
    }
    writeln!(w, " */")?;
    Ok(())
}

fn write_check_offset<W: Write>(w: &mut W, assertion: &OffsetAssertion) -> Result<()> {
    writeln!(
        w,
        "check_offset({}, {}, {}, {});",
        js_string(&assertion.zone)?,
        assertion.instant,
        assertion.expected.offset,
        js_string(&assertion.expected.abbr)?
    )?;
    Ok(())
}

fn write_dates_for<W: Write>(
    w: &mut W,
    index: usize,
    assertion: &EnumerationAssertion,
) -> Result<()> {
    let civil = &assertion.civil;
    let binding = if index == 1 { "var df" } else { "df" };
    writeln!(
        w,
        "{binding} = window.tz.datesFor({}, {}, {}, {}, {}, {}, {});",
        js_string(&assertion.zone)?,
        civil.year,
        civil.month,
        civil.day,
        civil.hour,
        civil.minute,
        civil.second
    )?;
    writeln!(
        w,
        r#"is(df.length, {}, "datesFor ({index}) length");"#,
        assertion.results.len()
    )?;
    for (i, result) in assertion.results.iter().enumerate() {
        writeln!(
            w,
            r#"is(df[{i}].offset, {}, "datesFor({index}) [{i}].offset");"#,
            result.expected.offset
        )?;
        writeln!(
            w,
            r#"is(df[{i}].abbr, {}, "datesFor({index}) [{i}].abbr");"#,
            js_string(&result.expected.abbr)?
        )?;
        writeln!(
            w,
            r#"is(df[{i}].date.valueOf(), {}, "datesFor({index}) [{i}].date.valueOf()");"#,
            result.instant.millis()
        )?;
    }
    Ok(())
}
