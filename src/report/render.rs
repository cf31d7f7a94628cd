//! Markdown renderer for the contribution document.
//!
//! Produces the banner, the fixed-order Gerrit mirror section, and the
//! star-ranked GitHub section. The mirror section always follows catalog
//! order; only the GitHub section is star-sorted.

use std::io::Write;

use url::Url;

use crate::catalog::{Catalog, GerritMirror};
use crate::github::error::ReportError;
use crate::github::identity::AccountLogin;

use super::ledger::RankedRepository;

/// Writes the complete contribution document to the given writer.
///
/// `repositories` must already be in render order (see
/// [`crate::report::ledger::StarLedger::into_ranked`]).
///
/// # Errors
///
/// Returns [`ReportError::Io`] if writing fails and
/// [`ReportError::Configuration`] if a mirror log URL cannot be composed.
pub fn write_report<W: Write>(
    writer: &mut W,
    catalog: &Catalog,
    repositories: &[RankedRepository],
) -> Result<(), ReportError> {
    write_banner(writer)?;
    write_gerrit_section(writer, catalog)?;
    write_github_section(writer, repositories)?;
    Ok(())
}

/// Writes the generated-file banner with regeneration instructions.
fn write_banner<W: Write>(writer: &mut W) -> Result<(), ReportError> {
    writer
        .write_all(
            b"<!---\n\
              Code generated by contribs; DO NOT EDIT.\n\
              \n\
              To update the doc run:\n\
              GITHUB_TOKEN=<YOUR_TOKEN> cargo run --release\n\
              -->\n\
              \n\
              # Open Source Projects I've Ever Contributed\n",
        )
        .map_err(|e| io_error(&e))
}

/// Writes the Go Google Git section in catalog order.
fn write_gerrit_section<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<(), ReportError> {
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "## Go Google Git Repositories").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "_links pointed to a log with my contributions_")
        .map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for mirror in catalog.gerrit_mirrors() {
        let log_url = mirror_log_url(mirror, catalog.operator())?;
        writeln!(writer, "* [{}]({log_url})", mirror.source_repo()).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes the GitHub section in the supplied (star-ranked) order.
fn write_github_section<W: Write>(
    writer: &mut W,
    repositories: &[RankedRepository],
) -> Result<(), ReportError> {
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "## GitHub Projects").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "_sorted by stars descending_").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for repository in repositories {
        writeln!(
            writer,
            "* [{slug}](https://github.com/{slug})",
            slug = repository.slug
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Composes the contribution-log URL for a mirror, filtered to the operator.
fn mirror_log_url(mirror: &GerritMirror, operator: &AccountLogin) -> Result<Url, ReportError> {
    Url::parse_with_params(
        &format!(
            "https://go.googlesource.com/{source}/+log",
            source = mirror.source_repo()
        ),
        &[("author", operator.as_str())],
    )
    .map_err(|error| ReportError::Configuration {
        message: format!("mirror log URL: {error}"),
    })
}

/// Converts an I/O error to a [`ReportError::Io`].
fn io_error(error: &std::io::Error) -> ReportError {
    ReportError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::write_report;
    use crate::catalog::Catalog;
    use crate::github::identity::RepoSlug;
    use crate::report::ledger::RankedRepository;

    fn ranked(slug: &str, stars: u64) -> RankedRepository {
        RankedRepository {
            slug: RepoSlug::parse(slug).expect("slug should parse"),
            star_count: stars,
        }
    }

    fn render(repositories: &[RankedRepository]) -> String {
        let catalog = Catalog::builtin().expect("builtin catalog should be valid");
        let mut buffer = Vec::new();
        write_report(&mut buffer, &catalog, repositories).expect("render should succeed");
        String::from_utf8(buffer).expect("document should be valid UTF-8")
    }

    #[test]
    fn banner_carries_regeneration_instructions() {
        let document = render(&[]);

        assert!(document.starts_with("<!---\n"), "missing banner: {document}");
        assert!(document.contains("DO NOT EDIT"));
        assert!(document.contains("GITHUB_TOKEN=<YOUR_TOKEN> cargo run --release"));
        assert!(document.contains("# Open Source Projects I've Ever Contributed"));
    }

    #[test]
    fn gerrit_section_lists_all_mirrors_in_catalog_order() {
        let document = render(&[ranked("golang/go", 5), ranked("golang/build", 9)]);

        let expected_lines = [
            "* [build](https://go.googlesource.com/build/+log?author=tylitianrui)",
            "* [go](https://go.googlesource.com/go/+log?author=tylitianrui)",
            "* [net](https://go.googlesource.com/net/+log?author=tylitianrui)",
            "* [mod](https://go.googlesource.com/mod/+log?author=tylitianrui)",
            "* [protobuf](https://go.googlesource.com/protobuf/+log?author=tylitianrui)",
            "* [tools](https://go.googlesource.com/tools/+log?author=tylitianrui)",
            "* [text](https://go.googlesource.com/text/+log?author=tylitianrui)",
            "* [vulndb](https://go.googlesource.com/vulndb/+log?author=tylitianrui)",
            "* [website](https://go.googlesource.com/website/+log?author=tylitianrui)",
        ];

        let mut last_position = 0;
        for line in expected_lines {
            let position = document
                .find(line)
                .unwrap_or_else(|| panic!("missing mirror line {line} in {document}"));
            assert!(
                position > last_position,
                "mirror line out of order: {line}"
            );
            last_position = position;
        }
    }

    #[test]
    fn github_section_preserves_the_supplied_ranking() {
        let document = render(&[
            ranked("golang/go", 120_000),
            ranked("cue-lang/cue", 4800),
            ranked("a/tiny", 1),
        ]);

        let go_position = document
            .find("* [golang/go](https://github.com/golang/go)")
            .expect("go link expected");
        let cue_position = document
            .find("* [cue-lang/cue](https://github.com/cue-lang/cue)")
            .expect("cue link expected");
        let tiny_position = document
            .find("* [a/tiny](https://github.com/a/tiny)")
            .expect("tiny link expected");

        assert!(go_position < cue_position);
        assert!(cue_position < tiny_position);
    }

    #[test]
    fn github_section_follows_the_gerrit_section() {
        let document = render(&[ranked("golang/go", 1)]);

        let gerrit_heading = document
            .find("## Go Google Git Repositories")
            .expect("gerrit heading expected");
        let github_heading = document
            .find("## GitHub Projects")
            .expect("github heading expected");
        assert!(gerrit_heading < github_heading);
        assert!(document.contains("_sorted by stars descending_"));
    }
}
