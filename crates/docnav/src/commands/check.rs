//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_generator::{Generator, ListingDecl};

use crate::commands::report_skips;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown corpus root (overrides config).
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Listing declaration file (overrides config).
    #[arg(long)]
    declaration: Option<PathBuf>,

    /// Route prefix for article URLs (overrides config).
    #[arg(long)]
    route_prefix: Option<String>,

    /// Enable verbose output (per-document logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Runs the full scan-and-reconcile pass without writing the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error on the same fatal conditions as `generate`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_root: self.content_root,
            declaration: self.declaration,
            output: None,
            route_prefix: self.route_prefix,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let decl = ListingDecl::load(&config.content_resolved.declaration)?;
        let generator = Generator::new(
            config.content_resolved.root.clone(),
            config.generate_resolved.route_prefix.clone(),
        );

        let report = generator.check(&decl)?;
        report_skips(&output, &report);

        let articles = report.listing.articles().count();
        let skipped = report.skipped.len();
        output.success(&format!(
            "Listing OK ({articles} articles, {skipped} skipped)"
        ));

        Ok(())
    }
}
