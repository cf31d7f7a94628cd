//! Report pipeline: fetch, aggregate, rank, and render.
//!
//! [`generate`] is the writer-generic orchestration used by tests;
//! [`generate_to_path`] adds the output-file plumbing the binary needs,
//! with create, flush, and sync failures all treated as fatal.

pub mod ledger;
pub mod render;

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;

use crate::catalog::Catalog;
use crate::github::error::ReportError;
use crate::github::gateway::ContributionGateway;
use crate::github::intake::ContributionIntake;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

pub use ledger::{RankedRepository, StarLedger};

/// Counts describing a completed report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// Pull requests fetched across all pages.
    pub pull_request_count: usize,
    /// Distinct repositories in the rendered document.
    pub repository_count: usize,
}

/// Builds the contribution document and writes it to `writer`.
///
/// Runs the full pipeline: drain the viewer's pull requests, apply the
/// three aggregation passes, rank, and render.
///
/// # Errors
///
/// Returns the first fetch failure unchanged (any pull-request page failure
/// is fatal), or a render failure. Star-count resolution failures for
/// catalog entries degrade to fallback values instead of erroring.
pub async fn generate<Gateway, W>(
    gateway: &Gateway,
    catalog: &Catalog,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<ReportSummary, ReportError>
where
    Gateway: ContributionGateway,
    W: Write,
{
    let intake = ContributionIntake::new(gateway);
    let pull_requests = intake.fetch_all_pull_requests().await?;

    let mut star_ledger = StarLedger::new();
    star_ledger.apply_pull_requests(&pull_requests, catalog.operator(), telemetry);
    star_ledger
        .apply_gerrit_mirrors(gateway, catalog.gerrit_mirrors(), telemetry)
        .await;
    star_ledger
        .apply_additional_repositories(gateway, catalog.additional_repositories(), telemetry)
        .await;

    let repositories = star_ledger.into_ranked();
    render::write_report(writer, catalog, &repositories)?;

    let summary = ReportSummary {
        pull_request_count: pull_requests.len(),
        repository_count: repositories.len(),
    };
    telemetry.record(TelemetryEvent::ReportGenerated {
        pull_request_count: summary.pull_request_count,
        repository_count: summary.repository_count,
    });
    Ok(summary)
}

/// Builds the contribution document at `path` with truncate-and-create
/// semantics.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the file cannot be created, written,
/// flushed, or synced, in addition to the failures of [`generate`].
pub async fn generate_to_path<Gateway>(
    gateway: &Gateway,
    catalog: &Catalog,
    telemetry: &dyn TelemetrySink,
    path: &Utf8Path,
) -> Result<ReportSummary, ReportError>
where
    Gateway: ContributionGateway,
{
    let file = File::create(path).map_err(|error| ReportError::Io {
        message: format!("create {path}: {error}"),
    })?;
    let mut writer = BufWriter::new(file);

    let summary = generate(gateway, catalog, telemetry, &mut writer).await?;

    let inner = writer.into_inner().map_err(|error| ReportError::Io {
        message: format!("flush {path}: {error}"),
    })?;
    inner.sync_all().map_err(|error| ReportError::Io {
        message: format!("sync {path}: {error}"),
    })?;
    Ok(summary)
}
