//! `[site]` section configuration.
//!
//! Metadata interpolated into the rendered index page.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Game Catalog"
//! description = "A showcase of our games"
//! ```

use serde::{Deserialize, Serialize};

/// Site metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Page title.
    pub title: String,

    /// Page description.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_section() {
        let config = test_parse_config("");
        assert_eq!(config.site.title, "Test");
        assert_eq!(config.site.description, "Test");
    }

    #[test]
    fn test_site_section_defaults() {
        let config: crate::config::SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "");
        assert_eq!(config.site.description, "");
    }
}
