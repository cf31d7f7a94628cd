//! Three-pass star aggregation over the discovered repositories.
//!
//! The ledger is one mutable mapping from repository identity to star count.
//! Passes run in a fixed order and each is last-write-wins: the Gerrit
//! mirror pass and the allow-list pass unconditionally overwrite whatever
//! the pull-request pass recorded for the same repository.

use std::collections::BTreeMap;

use crate::catalog::{
    ADDITIONAL_REPOSITORY_FALLBACK_STARS, GERRIT_MIRROR_FALLBACK_STARS, GerritMirror,
};
use crate::github::error::ReportError;
use crate::github::gateway::ContributionGateway;
use crate::github::identity::{AccountLogin, RepoSlug};
use crate::github::models::PullRequestContribution;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// One repository of the final document, with its resolved star count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRepository {
    /// Repository identity.
    pub slug: RepoSlug,
    /// Star count the document ranks by.
    pub star_count: u64,
}

/// Mutable aggregation mapping built up by the three passes.
#[derive(Debug, Default)]
pub struct StarLedger {
    entries: BTreeMap<RepoSlug, u64>,
}

impl StarLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Pass 1: records merged upstream pull requests with their embedded
    /// star counts.
    ///
    /// Repositories owned by the operator are skipped, as are pull requests
    /// that were closed without merging; both skips are informational, not
    /// errors. Later records overwrite earlier ones for the same repository.
    pub fn apply_pull_requests(
        &mut self,
        records: &[PullRequestContribution],
        operator: &AccountLogin,
        telemetry: &dyn TelemetrySink,
    ) {
        for record in records {
            if operator.owns(&record.repository) {
                telemetry.record(TelemetryEvent::OwnRepositorySkipped {
                    repository: record.repository.to_string(),
                });
                continue;
            }
            if !record.merged {
                telemetry.record(TelemetryEvent::UnmergedPullRequestSkipped {
                    repository: record.repository.to_string(),
                });
                continue;
            }

            self.entries
                .insert(record.repository.clone(), record.star_count);
        }
    }

    /// Pass 2: resolves live star counts for the Gerrit mirrors,
    /// substituting [`GERRIT_MIRROR_FALLBACK_STARS`] on failure.
    ///
    /// Always overwrites pass 1 entries for the same repository.
    pub async fn apply_gerrit_mirrors<Gateway>(
        &mut self,
        gateway: &Gateway,
        mirrors: &[GerritMirror],
        telemetry: &dyn TelemetrySink,
    ) where
        Gateway: ContributionGateway,
    {
        for mirror in mirrors {
            self.record_resolved(
                gateway,
                mirror.github_slug(),
                GERRIT_MIRROR_FALLBACK_STARS,
                telemetry,
            )
            .await;
        }
    }

    /// Pass 3: resolves live star counts for the allow-listed repositories,
    /// substituting [`ADDITIONAL_REPOSITORY_FALLBACK_STARS`] on failure.
    ///
    /// Always overwrites earlier entries for the same repository.
    pub async fn apply_additional_repositories<Gateway>(
        &mut self,
        gateway: &Gateway,
        repositories: &[RepoSlug],
        telemetry: &dyn TelemetrySink,
    ) where
        Gateway: ContributionGateway,
    {
        for slug in repositories {
            self.record_resolved(
                gateway,
                slug,
                ADDITIONAL_REPOSITORY_FALLBACK_STARS,
                telemetry,
            )
            .await;
        }
    }

    async fn record_resolved<Gateway>(
        &mut self,
        gateway: &Gateway,
        slug: &RepoSlug,
        fallback_stars: u64,
        telemetry: &dyn TelemetrySink,
    ) where
        Gateway: ContributionGateway,
    {
        let stars = match gateway.repository_star_count(slug).await {
            Ok(resolved) => resolved,
            Err(error) => {
                warn_degraded(slug, &error);
                telemetry.record(TelemetryEvent::StarCountFallbackApplied {
                    repository: slug.to_string(),
                    fallback_stars,
                });
                fallback_stars
            }
        };

        self.entries.insert(slug.clone(), stars);
    }

    /// Number of distinct repositories recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no repository has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the ledger into the render order: star count descending,
    /// then `owner/name` ascending for equal counts.
    #[must_use]
    pub fn into_ranked(self) -> Vec<RankedRepository> {
        let mut ranked: Vec<RankedRepository> = self
            .entries
            .into_iter()
            .map(|(slug, star_count)| RankedRepository { slug, star_count })
            .collect();

        ranked.sort_by(|a, b| {
            b.star_count
                .cmp(&a.star_count)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        ranked
    }
}

fn warn_degraded(slug: &RepoSlug, error: &ReportError) {
    tracing::warn!("failed to resolve star count for '{slug}': {error}");
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;

    use super::{RankedRepository, StarLedger};
    use crate::catalog::Catalog;
    use crate::github::error::ReportError;
    use crate::github::gateway::ContributionGateway;
    use crate::github::identity::{AccountLogin, RepoSlug};
    use crate::github::models::PullRequestContribution;
    use crate::github::pagination::CursorPage;
    use crate::telemetry::TelemetryEvent;
    use crate::telemetry::test_support::RecordingSink;

    /// Gateway double answering star queries from a scripted table.
    #[derive(Default)]
    struct ScriptedStars {
        responses: BTreeMap<String, Result<u64, ReportError>>,
    }

    impl ScriptedStars {
        fn with(mut self, slug: &str, response: Result<u64, ReportError>) -> Self {
            self.responses.insert(slug.to_owned(), response);
            self
        }
    }

    #[async_trait]
    impl ContributionGateway for ScriptedStars {
        async fn viewer_pull_requests(
            &self,
            _after: Option<String>,
        ) -> Result<CursorPage<PullRequestContribution>, ReportError> {
            Err(ReportError::Api {
                message: "unexpected pull request query".to_owned(),
            })
        }

        async fn repository_star_count(&self, slug: &RepoSlug) -> Result<u64, ReportError> {
            self.responses
                .get(&slug.to_string())
                .cloned()
                .unwrap_or_else(|| {
                    Err(ReportError::Api {
                        message: format!("no scripted response for {slug}"),
                    })
                })
        }
    }

    fn record(slug: &str, stars: u64, merged: bool) -> PullRequestContribution {
        PullRequestContribution {
            repository: RepoSlug::parse(slug).expect("slug should parse"),
            star_count: stars,
            merged,
            closed: true,
        }
    }

    fn operator() -> AccountLogin {
        AccountLogin::new("op").expect("login should be valid")
    }

    fn ranked_pairs(ledger: StarLedger) -> Vec<(String, u64)> {
        ledger
            .into_ranked()
            .into_iter()
            .map(|entry| (entry.slug.to_string(), entry.star_count))
            .collect()
    }

    #[test]
    fn merged_upstream_records_land_with_their_embedded_stars() {
        let telemetry = RecordingSink::default();
        let mut ledger = StarLedger::new();

        ledger.apply_pull_requests(&[record("a/b", 50, true)], &operator(), &telemetry);

        assert_eq!(ranked_pairs(ledger), vec![("a/b".to_owned(), 50)]);
        assert!(telemetry.take().is_empty());
    }

    #[test]
    fn unmerged_and_self_owned_records_are_skipped_with_events() {
        let telemetry = RecordingSink::default();
        let mut ledger = StarLedger::new();

        ledger.apply_pull_requests(
            &[
                record("a/b", 50, true),
                record("a/b", 999, false),
                record("op/self", 10, true),
            ],
            &operator(),
            &telemetry,
        );

        assert_eq!(ranked_pairs(ledger), vec![("a/b".to_owned(), 50)]);
        assert_eq!(
            telemetry.take(),
            vec![
                TelemetryEvent::UnmergedPullRequestSkipped {
                    repository: "a/b".to_owned(),
                },
                TelemetryEvent::OwnRepositorySkipped {
                    repository: "op/self".to_owned(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn mirror_pass_overrides_pull_request_stars() {
        let telemetry = RecordingSink::default();
        let catalog = Catalog::builtin().expect("builtin catalog should be valid");
        let gateway = ScriptedStars::default()
            .with("golang/go", Ok(123_456))
            .with("golang/build", Ok(721))
            .with("golang/net", Ok(1))
            .with("golang/mod", Ok(2))
            .with("protocolbuffers/protobuf-go", Ok(3))
            .with("golang/tools", Ok(4))
            .with("golang/text", Ok(5))
            .with("golang/vulndb", Ok(6))
            .with("golang/website", Ok(7));

        let mut ledger = StarLedger::new();
        // Stale embedded count from a years-old pull request edge.
        ledger.apply_pull_requests(&[record("golang/go", 9, true)], &operator(), &telemetry);
        ledger
            .apply_gerrit_mirrors(&gateway, catalog.gerrit_mirrors(), &telemetry)
            .await;

        let pairs = ranked_pairs(ledger);
        assert_eq!(
            pairs.first(),
            Some(&("golang/go".to_owned(), 123_456)),
            "mirror pass should overwrite the embedded count"
        );
        assert_eq!(pairs.len(), 9);
        assert!(telemetry.take().is_empty());
    }

    #[tokio::test]
    async fn failed_mirror_resolution_substitutes_one_thousand_stars() {
        let telemetry = RecordingSink::default();
        let gateway = ScriptedStars::default().with(
            "golang/build",
            Err(ReportError::Network {
                message: "connection reset".to_owned(),
            }),
        );
        let catalog = Catalog::builtin().expect("builtin catalog should be valid");
        let build_mirror: Vec<_> = catalog
            .gerrit_mirrors()
            .iter()
            .filter(|mirror| mirror.source_repo() == "build")
            .cloned()
            .collect();

        let mut ledger = StarLedger::new();
        ledger
            .apply_gerrit_mirrors(&gateway, &build_mirror, &telemetry)
            .await;

        assert_eq!(
            ranked_pairs(ledger),
            vec![("golang/build".to_owned(), 1000)]
        );
        assert_eq!(
            telemetry.take(),
            vec![TelemetryEvent::StarCountFallbackApplied {
                repository: "golang/build".to_owned(),
                fallback_stars: 1000,
            }]
        );
    }

    #[tokio::test]
    async fn failed_allow_list_resolution_substitutes_one_hundred_stars() {
        let telemetry = RecordingSink::default();
        let gateway = ScriptedStars::default()
            .with(
                "cue-lang/cue",
                Err(ReportError::Api {
                    message: "boom".to_owned(),
                }),
            )
            .with("cognitedata/cognite-sdk-python", Ok(42));
        let repositories = vec![
            RepoSlug::parse("cue-lang/cue").expect("slug should parse"),
            RepoSlug::parse("cognitedata/cognite-sdk-python").expect("slug should parse"),
        ];

        let mut ledger = StarLedger::new();
        // Pass 1 saw cue through an (unmerged-looking) mirror pull request.
        ledger.apply_pull_requests(&[record("cue-lang/cue", 7, true)], &operator(), &telemetry);
        ledger
            .apply_additional_repositories(&gateway, &repositories, &telemetry)
            .await;

        assert_eq!(
            ranked_pairs(ledger),
            vec![
                ("cue-lang/cue".to_owned(), 100),
                ("cognitedata/cognite-sdk-python".to_owned(), 42),
            ]
        );
        assert_eq!(
            telemetry.take(),
            vec![TelemetryEvent::StarCountFallbackApplied {
                repository: "cue-lang/cue".to_owned(),
                fallback_stars: 100,
            }]
        );
    }

    #[test]
    fn ranking_breaks_star_ties_alphabetically() {
        let telemetry = RecordingSink::default();
        let mut ledger = StarLedger::new();
        ledger.apply_pull_requests(
            &[
                record("zeta/last", 10, true),
                record("alpha/first", 10, true),
                record("mid/way", 99, true),
            ],
            &operator(),
            &telemetry,
        );

        let ranked: Vec<RankedRepository> = ledger.into_ranked();
        let slugs: Vec<String> = ranked
            .iter()
            .map(|entry| entry.slug.to_string())
            .collect();
        assert_eq!(slugs, vec!["mid/way", "alpha/first", "zeta/last"]);
    }

    #[test]
    fn ledger_reports_its_size() {
        let telemetry = RecordingSink::default();
        let mut ledger = StarLedger::new();
        assert!(ledger.is_empty());

        ledger.apply_pull_requests(&[record("a/b", 1, true)], &operator(), &telemetry);
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
    }
}
