//! Contribs library crate generating an open-source contribution document.
//!
//! The library wraps Octocrab to page through the operator's merged and
//! closed pull requests on GitHub, cross-reference the compiled-in catalog
//! of Gerrit-mirrored repositories, aggregate star counts with
//! last-write-wins override passes, and render the ranked Markdown
//! document.

pub mod catalog;
pub mod config;
pub mod github;
pub mod report;
pub mod telemetry;

pub use catalog::Catalog;
pub use config::ContribsConfig;
pub use github::{
    ContributionGateway, ContributionIntake, OctocrabContributionGateway, PersonalAccessToken,
    PullRequestContribution, RepoSlug, ReportError,
};
pub use report::{RankedRepository, ReportSummary, StarLedger};
pub use telemetry::{
    NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink,
};
