//! `docnav generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_generator::{Generator, ListingDecl};

use crate::commands::report_skips;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown corpus root (overrides config).
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Listing declaration file (overrides config).
    #[arg(long)]
    declaration: Option<PathBuf>,

    /// Generated artifact path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Route prefix for article URLs (overrides config).
    #[arg(long)]
    route_prefix: Option<String>,

    /// Enable verbose output (per-document logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, declaration loading, or
    /// generation fails; the caller maps this to a non-zero exit status.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            content_root: self.content_root,
            declaration: self.declaration,
            output: self.output,
            route_prefix: self.route_prefix,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let decl = ListingDecl::load(&config.content_resolved.declaration)?;
        let generator = Generator::new(
            config.content_resolved.root.clone(),
            config.generate_resolved.route_prefix.clone(),
        );

        let report = generator.generate(&decl, &config.generate_resolved.output)?;
        report_skips(&output, &report);

        let articles = report.listing.articles().count();
        let path = config.generate_resolved.output.display();
        if report.unchanged {
            output.info(&format!("Listing up to date ({articles} articles): {path}"));
        } else {
            output.success(&format!("Wrote listing ({articles} articles): {path}"));
        }

        Ok(())
    }
}
