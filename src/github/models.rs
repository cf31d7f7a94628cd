//! Data models for contribution records returned by the GitHub GraphQL API.
//!
//! Types prefixed with `Api` are internal deserialisation targets for the
//! GraphQL response shape; they convert into the public domain types consumed
//! by the aggregation passes.

use serde::Deserialize;

use super::error::ReportError;
use super::identity::RepoSlug;

/// One pull request authored by the viewer, as observed on a query edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContribution {
    /// Repository the pull request targets.
    pub repository: RepoSlug,
    /// Star count embedded in the pull request's repository data.
    pub star_count: u64,
    /// Whether the pull request was merged.
    pub merged: bool,
    /// Whether the pull request was closed.
    pub closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiViewerData {
    pub(super) viewer: ApiViewer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiViewer {
    pub(super) pull_requests: ApiPullRequestConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPullRequestConnection {
    pub(super) page_info: ApiPageInfo,
    pub(super) edges: Vec<ApiPullRequestEdge>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPageInfo {
    pub(super) end_cursor: Option<String>,
    pub(super) has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestEdge {
    pub(super) node: ApiPullRequestNode,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestNode {
    pub(super) repository: ApiRepository,
    pub(super) merged: bool,
    pub(super) closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiRepository {
    pub(super) name_with_owner: String,
    pub(super) stargazer_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepositoryData {
    pub(super) repository: ApiRepositoryStars,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiRepositoryStars {
    pub(super) stargazer_count: u64,
}

impl TryFrom<ApiPullRequestNode> for PullRequestContribution {
    type Error = ReportError;

    fn try_from(value: ApiPullRequestNode) -> Result<Self, Self::Error> {
        let repository = RepoSlug::parse(&value.repository.name_with_owner)?;
        Ok(Self {
            repository,
            star_count: value.repository.stargazer_count,
            merged: value.merged,
            closed: value.closed,
        })
    }
}
