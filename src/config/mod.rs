//! Site configuration management for `vitrine.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[site]`    | Page metadata (title, description)             |
//! | `[content]` | Source directories (assets, data, template)    |
//! | `[serve]`   | HTTP server (port, interface, template reload) |

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{ContentConfig, ServeConfig, SiteSection};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing vitrine.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Page metadata
    pub site: SiteSection,

    /// Content source settings
    pub content: ContentConfig,

    /// HTTP server settings
    pub serve: ServeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteSection::default(),
            content: ContentConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// The project root is determined by the config file's parent directory;
    /// all content paths are normalized against it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = crate::utils::path::normalize_path(&cli.config);

        if !config_path.is_file() {
            log!(
                "error";
                "Config file '{}' not found.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        let mut config = Self::from_path(&config_path)?;

        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.content.normalize(&root);
        self.root = root;

        self.apply_command_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Check => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration: every content source must exist before the
    /// pipeline runs, so a bad path fails here with a config-shaped error
    /// instead of an opaque IO error mid-build.
    pub fn validate(&self) -> Result<()> {
        if !self.content.assets.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content.assets directory not found: {}",
                self.content.assets.display()
            ))
            .into());
        }
        if !self.content.data.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content.data directory not found: {}",
                self.content.data.display()
            ))
            .into());
        }
        if !self.content.template.is_file() {
            return Err(ConfigError::Validation(format!(
                "content.template file not found: {}",
                self.content.template.display()
            ))
            .into());
        }
        Ok(())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_parse_config`)
// ============================================================================

/// Parse config with minimal `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
