//! Contribs CLI entrypoint regenerating the contribution document.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8Path;
use contribs::report::{self, ReportSummary};
use contribs::{
    Catalog, ContribsConfig, OctocrabContributionGateway, PersonalAccessToken, ReportError,
    StderrJsonlTelemetrySink,
};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReportError> {
    let config = load_config()?;

    let token_value = config.resolve_token()?;
    let token = PersonalAccessToken::new(token_value)?;
    let catalog = Catalog::builtin()?;
    let gateway = OctocrabContributionGateway::for_token(&token)?;
    let telemetry = StderrJsonlTelemetrySink;

    let summary =
        report::generate_to_path(&gateway, &catalog, &telemetry, config.output_path()).await?;
    write_summary(config.output_path(), &summary)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ContribsConfig, ReportError> {
    ContribsConfig::load().map_err(|error| ReportError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(path: &Utf8Path, summary: &ReportSummary) -> Result<(), ReportError> {
    let mut stdout = io::stdout().lock();
    let message = format!(
        "Wrote {path}: {repositories} projects from {pull_requests} pull requests",
        repositories = summary.repository_count,
        pull_requests = summary.pull_request_count
    );

    writeln!(stdout, "{message}").map_err(|error| ReportError::Io {
        message: error.to_string(),
    })
}
