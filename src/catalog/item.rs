//! Catalog record descriptor.

use serde::Deserialize;

use crate::core::UrlPath;

/// One catalog record, deserialized from a `*.json` descriptor.
///
/// The descriptor carries camelCase flags; the resolved display fields
/// (`image_src`, `image_srcset`) are attached at load time from the
/// asset registry and never come from the file itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
    pub link: Option<String>,

    /// Logical asset path of the record's image, resolved against the
    /// registry at load time.
    pub image: Option<String>,

    /// Disabled records are dropped during loading.
    pub disabled: bool,

    /// The record's site links back to us; biases page ordering.
    pub has_link_back: bool,

    /// First-party records get a featured card style.
    pub first_party: bool,

    #[serde(skip)]
    pub image_src: Option<UrlPath>,

    #[serde(skip)]
    pub image_srcset: Option<String>,
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            link: None,
            image: None,
            disabled: false,
            has_link_back: false,
            first_party: false,
            image_src: None,
            image_srcset: None,
        }
    }
}
