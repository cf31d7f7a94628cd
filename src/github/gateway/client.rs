//! Octocrab client construction helpers for the gateway implementation.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::ReportError;
use crate::github::identity::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Base URL of the public GitHub API.
pub(super) const GITHUB_API_BASE: &str = "https://api.github.com";

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns [`ReportError::Api`] when the base URI cannot be parsed or when
/// Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ReportError> {
    let base_uri: Uri = api_base.parse::<Uri>().map_err(|error| ReportError::Api {
        message: format!("invalid API base URL: {error}"),
    })?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| ReportError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
