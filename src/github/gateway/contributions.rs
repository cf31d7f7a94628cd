//! Octocrab implementation of the contribution gateway.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::github::error::ReportError;
use crate::github::identity::{PersonalAccessToken, RepoSlug};
use crate::github::models::{ApiRepositoryData, ApiViewerData, PullRequestContribution};
use crate::github::pagination::CursorPage;

use super::ContributionGateway;
use super::client::{GITHUB_API_BASE, build_octocrab_client};
use super::error_mapping::map_octocrab_error;
use super::graphql::GraphQlEnvelope;

/// Query for the viewer's merged-and-closed pull requests, oldest first,
/// 100 edges per page.
const VIEWER_PULL_REQUESTS_QUERY: &str = "\
query($after: String) {
  viewer {
    pullRequests(states: [MERGED, CLOSED], orderBy: {field: CREATED_AT, direction: ASC}, first: 100, after: $after) {
      pageInfo { endCursor hasNextPage }
      edges { node { repository { nameWithOwner stargazerCount } merged closed } }
    }
  }
}";

/// Query for a single repository's star count.
const REPOSITORY_STARS_QUERY: &str = "\
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) { stargazerCount }
}";

/// Octocrab-backed gateway.
pub struct OctocrabContributionGateway {
    client: Octocrab,
}

impl OctocrabContributionGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a gateway against the public GitHub API for the given token.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Api`] when Octocrab fails to construct a
    /// client.
    pub fn for_token(token: &PersonalAccessToken) -> Result<Self, ReportError> {
        Self::with_api_base(token, GITHUB_API_BASE)
    }

    /// Builds a gateway against a custom API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Api`] when the base URI cannot be parsed or
    /// Octocrab fails to construct a client.
    pub fn with_api_base(token: &PersonalAccessToken, api_base: &str) -> Result<Self, ReportError> {
        build_octocrab_client(token, api_base).map(Self::new)
    }
}

#[async_trait]
impl ContributionGateway for OctocrabContributionGateway {
    async fn viewer_pull_requests(
        &self,
        after: Option<String>,
    ) -> Result<CursorPage<PullRequestContribution>, ReportError> {
        let payload = serde_json::json!({
            "query": VIEWER_PULL_REQUESTS_QUERY,
            "variables": { "after": after },
        });

        let envelope: GraphQlEnvelope<ApiViewerData> = self
            .client
            .graphql(&payload)
            .await
            .map_err(|error| map_octocrab_error("viewer pull requests", &error))?;
        let connection = envelope.into_data("viewer pull requests")?.viewer.pull_requests;

        let mut items = Vec::with_capacity(connection.edges.len());
        for edge in connection.edges {
            items.push(PullRequestContribution::try_from(edge.node)?);
        }

        Ok(CursorPage {
            items,
            end_cursor: connection.page_info.end_cursor,
            has_next_page: connection.page_info.has_next_page,
        })
    }

    async fn repository_star_count(&self, slug: &RepoSlug) -> Result<u64, ReportError> {
        let payload = serde_json::json!({
            "query": REPOSITORY_STARS_QUERY,
            "variables": { "owner": slug.owner(), "name": slug.name() },
        });

        let envelope: GraphQlEnvelope<ApiRepositoryData> = self
            .client
            .graphql(&payload)
            .await
            .map_err(|error| map_octocrab_error("repository stars", &error))?;

        Ok(envelope.into_data("repository stars")?.repository.stargazer_count)
    }
}
