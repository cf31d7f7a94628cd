//! Compiled-in catalog of the operator's contribution surfaces.
//!
//! The mirror and allow-list tables are ordered constant data: the rendered
//! document lists the Gerrit mirrors in exactly this order, so the tables
//! live in code rather than in an external configuration file.

use crate::github::error::ReportError;
use crate::github::identity::{AccountLogin, RepoSlug};

/// GitHub account whose contributions are reported. Repositories under this
/// owner are excluded from the pull-request pass, and the login filters the
/// Gerrit contribution-log links.
const OPERATOR_LOGIN: &str = "tylitianrui";

/// Go Google Git repositories the operator has contributed to, as
/// `(go.googlesource.com name, GitHub mirror owner/name)` pairs.
const GERRIT_MIRROR_TABLE: &[(&str, &str)] = &[
    ("build", "golang/build"),
    ("go", "golang/go"),
    ("net", "golang/net"),
    ("mod", "golang/mod"),
    ("protobuf", "protocolbuffers/protobuf-go"),
    ("tools", "golang/tools"),
    ("text", "golang/text"),
    ("vulndb", "golang/vulndb"),
    ("website", "golang/website"),
];

/// GitHub repositories whose pull requests read as closed-not-merged because
/// the upstream lives in Gerrit and GitHub is a mirror.
const ADDITIONAL_REPOSITORY_TABLE: &[&str] = &[
    "cue-lang/cue", // https://review.gerrithub.io/q/project:cue-lang%252Fcue
    "cognitedata/cognite-sdk-python",
];

/// Star count substituted when a Gerrit mirror's count cannot be resolved.
pub const GERRIT_MIRROR_FALLBACK_STARS: u64 = 1000;

/// Star count substituted when an allow-listed repository's count cannot be
/// resolved.
pub const ADDITIONAL_REPOSITORY_FALLBACK_STARS: u64 = 100;

/// Mapping of a Go Google Git repository to its GitHub mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GerritMirror {
    source_repo: String,
    github_slug: RepoSlug,
}

impl GerritMirror {
    /// Short repository name under `go.googlesource.com`.
    #[must_use]
    pub const fn source_repo(&self) -> &str {
        self.source_repo.as_str()
    }

    /// GitHub mirror identity.
    #[must_use]
    pub const fn github_slug(&self) -> &RepoSlug {
        &self.github_slug
    }
}

/// Immutable catalog of operator identity, mirror mappings, and the
/// additional allow-list, built once at startup and passed explicitly into
/// the components that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    operator: AccountLogin,
    gerrit_mirrors: Vec<GerritMirror>,
    additional_repositories: Vec<RepoSlug>,
}

impl Catalog {
    /// Builds the catalog from the compiled-in tables.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRepoSlug`] or
    /// [`ReportError::Configuration`] when a table entry is malformed.
    pub fn builtin() -> Result<Self, ReportError> {
        let operator = AccountLogin::new(OPERATOR_LOGIN)?;

        let mut gerrit_mirrors = Vec::with_capacity(GERRIT_MIRROR_TABLE.len());
        for (source_repo, github_slug) in GERRIT_MIRROR_TABLE {
            gerrit_mirrors.push(GerritMirror {
                source_repo: (*source_repo).to_owned(),
                github_slug: RepoSlug::parse(github_slug)?,
            });
        }

        let mut additional_repositories = Vec::with_capacity(ADDITIONAL_REPOSITORY_TABLE.len());
        for slug in ADDITIONAL_REPOSITORY_TABLE {
            additional_repositories.push(RepoSlug::parse(slug)?);
        }

        Ok(Self {
            operator,
            gerrit_mirrors,
            additional_repositories,
        })
    }

    /// Operator account login.
    #[must_use]
    pub const fn operator(&self) -> &AccountLogin {
        &self.operator
    }

    /// Gerrit mirror mappings, in document order.
    #[must_use]
    pub fn gerrit_mirrors(&self) -> &[GerritMirror] {
        &self.gerrit_mirrors
    }

    /// Allow-listed repositories whose merges read as closed pull requests.
    #[must_use]
    pub fn additional_repositories(&self) -> &[RepoSlug] {
        &self.additional_repositories
    }
}
