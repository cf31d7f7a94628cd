//! Application telemetry events and sinks.
//!
//! The report run is batch and non-interactive, but the aggregation passes
//! make skip and fallback decisions that an operator wants to see when a
//! regenerated document looks wrong. Those decisions surface as structured
//! events rather than being buried in free-form log text.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted while building the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A pull request against the operator's own repository was skipped.
    OwnRepositorySkipped {
        /// The `owner/name` of the skipped repository.
        repository: String,
    },
    /// A pull request that was closed without merging was skipped.
    UnmergedPullRequestSkipped {
        /// The `owner/name` of the skipped repository.
        repository: String,
    },
    /// A star-count lookup failed and the fallback value was recorded.
    StarCountFallbackApplied {
        /// The `owner/name` whose lookup failed.
        repository: String,
        /// The substituted star count.
        fallback_stars: u64,
    },
    /// The document was rendered successfully.
    ReportGenerated {
        /// Pull requests fetched from the API.
        pull_request_count: usize,
        /// Distinct repositories in the final document.
        repository_count: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local observation and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
