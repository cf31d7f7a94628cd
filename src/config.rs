//! Application configuration loaded from CLI, environment, and files.
//!
//! The canonical invocation needs nothing beyond `GITHUB_TOKEN` in the
//! environment; the layered sources exist so the token and output location
//! can be overridden without editing the source.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.contribs.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CONTRIBS_TOKEN`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t` and `--output`/`-o`

use std::env;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ReportError;

/// Default location of the generated document, relative to the working
/// directory.
const DEFAULT_OUTPUT_PATH: &str = "CONTRIBUTIONS.md";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CONTRIBS_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `CONTRIBS_OUTPUT` or `--output`: Output document path
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CONTRIBS",
    discovery(
        dotfile_name = ".contribs.toml",
        config_file_name = "contribs.toml",
        app_name = "contribs"
    )
)]
pub struct ContribsConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `CONTRIBS_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Path of the generated Markdown document.
    ///
    /// Can be provided via:
    /// - CLI: `--output <PATH>` or `-o <PATH>`
    /// - Environment: `CONTRIBS_OUTPUT`
    /// - Config file: `output = "..."`
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,
}

impl ContribsConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// `GITHUB_TOKEN` is the variable the regeneration instructions in the
    /// document banner name, so it stays supported regardless of the
    /// `CONTRIBS_*` layering.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, ReportError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(ReportError::MissingToken)
    }

    /// Returns the output document path, defaulting to `CONTRIBUTIONS.md`.
    #[must_use]
    pub fn output_path(&self) -> &Utf8Path {
        self.output
            .as_deref()
            .map_or_else(|| Utf8Path::new(DEFAULT_OUTPUT_PATH), Utf8Path::new)
    }
}
