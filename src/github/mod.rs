//! GitHub contribution intake over the GraphQL API.
//!
//! This module wraps Octocrab to authenticate with a personal access token,
//! page through the viewer's pull request history, and resolve repository
//! star counts. Errors are mapped into user-facing variants so that callers
//! can surface precise failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod identity;
pub mod intake;
pub mod models;
pub mod pagination;

pub use error::ReportError;
pub use gateway::{ContributionGateway, OctocrabContributionGateway};
pub use identity::{AccountLogin, PersonalAccessToken, RepoSlug};
pub use intake::ContributionIntake;
pub use models::PullRequestContribution;
pub use pagination::{CursorPage, collect_all_pages};

#[cfg(test)]
pub use gateway::MockContributionGateway;
