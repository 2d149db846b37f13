//! CLI error types.

use docnav_config::ConfigError;
use docnav_generator::{DeclarationError, GenerateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Declaration(#[from] DeclarationError),

    #[error("{0}")]
    Generate(#[from] GenerateError),
}
