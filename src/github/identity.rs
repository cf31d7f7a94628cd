//! Identity wrappers for repositories, accounts, and credentials.
//!
//! These newtypes keep `owner/name` identifiers, account logins, and access
//! tokens from degenerating into interchangeable strings at component seams.

use std::fmt;

use super::error::ReportError;

/// Canonical two-part repository identifier (`owner/name`).
///
/// Ordering is lexicographic over `(owner, name)`, which gives the ranked
/// output its deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Builds a slug from pre-split owner and name segments.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRepoSlug`] when either segment is empty
    /// or the name contains a further `/`.
    pub fn from_parts(owner: &str, name: &str) -> Result<Self, ReportError> {
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(ReportError::InvalidRepoSlug {
                slug: format!("{owner}/{name}"),
            });
        }
        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Parses an `owner/name` identifier.
    ///
    /// The input must split into exactly two non-empty segments on `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRepoSlug`] for any other shape, before
    /// any API query is issued.
    pub fn parse(input: &str) -> Result<Self, ReportError> {
        let Some((owner, name)) = input.split_once('/') else {
            return Err(ReportError::InvalidRepoSlug {
                slug: input.to_owned(),
            });
        };
        Self::from_parts(owner, name)
    }

    /// Borrow the owner segment.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Borrow the name segment.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Account login wrapper for the operator whose contributions are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLogin(String);

impl AccountLogin {
    /// Validates that the login is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] when the supplied login is
    /// blank.
    pub fn new(value: &str) -> Result<Self, ReportError> {
        if value.is_empty() {
            return Err(ReportError::Configuration {
                message: "operator login must be non-empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the login value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true when the repository belongs to this account.
    #[must_use]
    pub fn owns(&self, slug: &RepoSlug) -> bool {
        slug.owner() == self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReportError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}
