//! `[content]` section configuration.
//!
//! Source directories for the asset pipeline and the catalog loader.
//! All paths are relative to the config file's directory and are
//! normalized to absolute form during loading.
//!
//! # Example
//!
//! ```toml
//! [content]
//! assets = "static"           # Asset root scanned by the pipeline
//! data = "data"               # Catalog record descriptors (*.json)
//! template = "template.html"  # Index page template
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Content source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Asset root directory scanned by the pipeline.
    pub assets: PathBuf,

    /// Directory holding catalog record descriptors (`*.json`).
    pub data: PathBuf,

    /// Index page template file.
    pub template: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("static"),
            data: PathBuf::from("data"),
            template: PathBuf::from("template.html"),
        }
    }
}

impl ContentConfig {
    /// Normalize all content paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.assets = crate::utils::path::normalize_path(&root.join(&self.assets));
        self.data = crate::utils::path::normalize_path(&root.join(&self.data));
        self.template = crate::utils::path::normalize_path(&root.join(&self.template));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_content_config() {
        let config =
            test_parse_config("[content]\nassets = \"assets\"\ndata = \"records\"");

        assert_eq!(config.content.assets, PathBuf::from("assets"));
        assert_eq!(config.content.data, PathBuf::from("records"));
        // template uses default
        assert_eq!(config.content.template, PathBuf::from("template.html"));
    }

    #[test]
    fn test_content_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.content.assets, PathBuf::from("static"));
        assert_eq!(config.content.data, PathBuf::from("data"));
        assert_eq!(config.content.template, PathBuf::from("template.html"));
    }
}
