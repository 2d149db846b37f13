//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.root`
//! - `content.declaration`
//! - `generate.output`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the markdown corpus root.
    pub content_root: Option<PathBuf>,
    /// Override the listing declaration file.
    pub declaration: Option<PathBuf>,
    /// Override the generated artifact path.
    pub output: Option<PathBuf>,
    /// Override the route prefix.
    pub route_prefix: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Generation configuration.
    generate: GenerateConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved generation configuration (set after loading).
    #[serde(skip)]
    pub generate_resolved: GenerateConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    declaration: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory of the markdown corpus.
    pub root: PathBuf,
    /// Hand-authored listing declaration file.
    pub declaration: PathBuf,
}

/// Raw generation configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GenerateConfigRaw {
    output: Option<String>,
    route_prefix: Option<String>,
}

/// Resolved generation configuration.
#[derive(Debug)]
pub struct GenerateConfig {
    /// Path of the generated listing source file.
    pub output: PathBuf,
    /// URL prefix prepended to every article route.
    pub route_prefix: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("src/generated/listing.rs"),
            route_prefix: "/docs".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_root) = &settings.content_root {
            self.content_resolved.root.clone_from(content_root);
        }
        if let Some(declaration) = &settings.declaration {
            self.content_resolved.declaration.clone_from(declaration);
        }
        if let Some(output) = &settings.output {
            self.generate_resolved.output.clone_from(output);
        }
        if let Some(route_prefix) = &settings.route_prefix {
            self.generate_resolved.route_prefix.clone_from(route_prefix);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            generate: GenerateConfigRaw::default(),
            content_resolved: ContentConfig {
                root: base.join("content/docs"),
                declaration: base.join("listing.toml"),
            },
            generate_resolved: GenerateConfig {
                output: base.join("src/generated/listing.rs"),
                route_prefix: "/docs".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve raw string settings into expanded, based paths.
    fn resolve(&mut self, base: &Path) -> Result<(), ConfigError> {
        let defaults = Self::default_with_base(base);

        self.content_resolved.root = match &self.content.root {
            Some(raw) => resolve_path(raw, "content.root", base)?,
            None => defaults.content_resolved.root,
        };
        self.content_resolved.declaration = match &self.content.declaration {
            Some(raw) => resolve_path(raw, "content.declaration", base)?,
            None => defaults.content_resolved.declaration,
        };
        self.generate_resolved.output = match &self.generate.output {
            Some(raw) => resolve_path(raw, "generate.output", base)?,
            None => defaults.generate_resolved.output,
        };
        self.generate_resolved.route_prefix = self
            .generate
            .route_prefix
            .clone()
            .unwrap_or(defaults.generate_resolved.route_prefix);

        Ok(())
    }

    /// Validate the resolved configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.generate_resolved.route_prefix;
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "generate.route_prefix must start with '/': '{prefix}'"
            )));
        }
        if prefix.len() > 1 && prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "generate.route_prefix must not end with '/': '{prefix}'"
            )));
        }
        Ok(())
    }
}

/// Expand environment variables in a raw path and resolve it against `base`.
fn resolve_path(raw: &str, field: &str, base: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand::expand_env(raw, field)?;
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}
