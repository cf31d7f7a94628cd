//! Gateways for reading contribution data through Octocrab.
//!
//! This module provides a trait-based gateway for the two GraphQL queries the
//! report needs. The trait-based design enables mocking in tests while the
//! Octocrab implementation handles real HTTP requests.

mod client;
mod contributions;
mod error_mapping;
mod graphql;

pub use contributions::OctocrabContributionGateway;

use async_trait::async_trait;

use crate::github::error::ReportError;
use crate::github::identity::RepoSlug;
use crate::github::models::PullRequestContribution;
use crate::github::pagination::CursorPage;

/// Gateway that can read the viewer's contribution data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributionGateway: Send + Sync {
    /// Fetch one page of the viewer's merged-and-closed pull requests.
    ///
    /// `after` is `None` for the first page and the previous page's end
    /// cursor thereafter.
    async fn viewer_pull_requests(
        &self,
        after: Option<String>,
    ) -> Result<CursorPage<PullRequestContribution>, ReportError>;

    /// Fetch the current star count for the named repository.
    async fn repository_star_count(&self, slug: &RepoSlug) -> Result<u64, ReportError>;
}
