//! High-level contribution intake facade used by the report pipeline.

use super::error::ReportError;
use super::gateway::ContributionGateway;
use super::models::PullRequestContribution;
use super::pagination::collect_all_pages;

/// Drains the viewer's pull request history through a gateway.
pub struct ContributionIntake<'client, Gateway>
where
    Gateway: ContributionGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ContributionIntake<'client, Gateway>
where
    Gateway: ContributionGateway,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Fetches every merged-and-closed pull request of the viewer, in API
    /// order, following the cursor pagination protocol to exhaustion.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure; no partial sequence is
    /// returned.
    pub async fn fetch_all_pull_requests(
        &self,
    ) -> Result<Vec<PullRequestContribution>, ReportError> {
        collect_all_pages(|after| self.client.viewer_pull_requests(after)).await
    }
}
