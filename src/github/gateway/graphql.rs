//! GraphQL response envelope shared by the gateway queries.
//!
//! GitHub reports GraphQL failures inside a `200` response body rather than
//! through the HTTP status, so every query result is unwrapped through
//! [`GraphQlEnvelope::into_data`] before its payload is trusted.

use serde::Deserialize;

use crate::github::error::ReportError;

/// Top-level GraphQL response body.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQlEnvelope<D> {
    pub(super) data: Option<D>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlError>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQlError {
    pub(super) message: String,
}

impl<D> GraphQlEnvelope<D> {
    /// Unwraps the payload, treating any `errors` entry as a failed query.
    ///
    /// Partial data accompanying an `errors` array is discarded: the run is
    /// single-attempt and never reports from a half-answered query.
    pub(super) fn into_data(self, operation: &str) -> Result<D, ReportError> {
        if !self.errors.is_empty() {
            let joined = self
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ReportError::Graphql {
                message: format!("{operation} failed: {joined}"),
            });
        }

        self.data.ok_or_else(|| ReportError::Graphql {
            message: format!("{operation} returned no data"),
        })
    }
}
