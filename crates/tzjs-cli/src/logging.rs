//! Minimal stderr tracer
//!
//! Stdout carries the report, so diagnostics go to stderr as
//! `LEVEL target: message field = value; ...` lines. `RUST_LOG` holds
//! comma-separated `level` or `target=level` directives; the most specific
//! matching target wins, otherwise the default threshold applies.

use std::fmt::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::field::Visit;
use tracing::{Event, Id, Level, Metadata, Subscriber};
use tracing_core::Field;
use tracing_core::span::{Attributes, Record};

static NEXT_SPAN_ID: AtomicU64 = AtomicU64::new(1);

/// Threshold for `-v` repetitions: warn, info, then debug
#[must_use]
pub fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Renders event fields into one line
struct LineVisitor<'a> {
    line: &'a mut String,
}

impl Visit for LineVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            let _ = write!(self.line, "{value} ");
        } else {
            let _ = write!(self.line, "{} = {value}; ", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.line, "{value:?} ");
        } else {
            let _ = write!(self.line, "{} = {value:?}; ", field.name());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TargetFilter {
    target: String,
    level: Level,
}

impl TargetFilter {
    /// The target itself or one of its `::` submodules
    fn matches(&self, target: &str) -> bool {
        target
            .strip_prefix(self.target.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

/// Subscriber writing leveled lines to stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StderrTracer {
    default_level: Level,
    targets: Vec<TargetFilter>,
}

impl StderrTracer {
    /// Build from `RUST_LOG` and the `-v` count
    #[must_use]
    pub fn from_env(verbosity: u8) -> Self {
        Self::parse(std::env::var("RUST_LOG").ok().as_deref(), verbosity)
    }

    /// Build from a directive string
    ///
    /// Unparseable directives are ignored. A bare level replaces the warn
    /// default; `-v` then only raises it, never lowers it.
    #[must_use]
    pub fn parse(directives: Option<&str>, verbosity: u8) -> Self {
        let mut default_level = Level::WARN;
        let mut targets = Vec::new();

        for directive in directives.unwrap_or_default().split(',') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }
            match directive.split_once('=') {
                Some((target, level)) => {
                    if let Some(level) = parse_level(level) {
                        targets.push(TargetFilter {
                            target: target.trim().to_string(),
                            level,
                        });
                    }
                }
                None => {
                    if let Some(level) = parse_level(directive) {
                        default_level = level;
                    }
                }
            }
        }
        if verbosity > 0 {
            default_level = default_level.max(verbosity_level(verbosity));
        }
        // Longest target first, so the most specific match wins
        targets.sort_by(|a, b| b.target.len().cmp(&a.target.len()));

        Self {
            default_level,
            targets,
        }
    }

    /// Install as the global subscriber
    ///
    /// # Errors
    ///
    /// Fails if a global subscriber is already set.
    pub fn register(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        tracing::subscriber::set_global_default(self)
    }

    /// Whether an event at `level` from `target` is shown
    #[must_use]
    pub fn is_enabled(&self, level: &Level, target: &str) -> bool {
        let threshold = self
            .targets
            .iter()
            .find(|f| f.matches(target))
            .map_or(self.default_level, |f| f.level);
        *level <= threshold
    }

    /// Format an event line
    fn format_event(event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut line = format!("{} {}: ", metadata.level(), metadata.target());
        event.record(&mut LineVisitor { line: &mut line });
        line.trim_end().to_string()
    }
}

impl Subscriber for StderrTracer {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.is_enabled(metadata.level(), metadata.target())
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(NEXT_SPAN_ID.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        eprintln!("{}", Self::format_event(event));
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
