//! Catalog record loading.
//!
//! Reads every `*.json` descriptor under the data directory and resolves
//! each record's image against the asset registry. A record referencing
//! an unknown asset path is a broken reference and aborts startup - it
//! must not silently render as a missing image.

mod item;

pub use item::CatalogItem;

use anyhow::{Context, Result, bail};

use crate::asset::{AssetRegistry, scan};
use crate::config::SiteConfig;
use crate::{debug, log};

/// Load all catalog records from the configured data directory.
///
/// Non-JSON files are ignored; records flagged `disabled` are dropped.
/// Parse errors name the offending file, missing image references name
/// the offending logical path; both are fatal.
pub fn load(config: &SiteConfig, registry: &AssetRegistry) -> Result<Vec<CatalogItem>> {
    let files = scan::enumerate(&config.content.data)?;

    let mut items = Vec::new();
    for file in files {
        if !file.logical.ends_with(".json") {
            continue;
        }

        let content = std::fs::read(&file.path)
            .with_context(|| format!("failed to read descriptor {}", file.logical))?;
        let mut item: CatalogItem = serde_json::from_slice(&content)
            .with_context(|| format!("invalid descriptor {}", file.logical))?;

        if item.disabled {
            debug!("data"; "skipping disabled record {}", file.logical);
            continue;
        }

        resolve_image(&mut item, registry, &file.logical)?;
        items.push(item);
    }

    log!("data"; "loaded {} records", items.len());
    Ok(items)
}

/// Attach the canonical URL and srcset for the record's image.
fn resolve_image(
    item: &mut CatalogItem,
    registry: &AssetRegistry,
    descriptor: &str,
) -> Result<()> {
    let Some(image) = &item.image else {
        return Ok(());
    };

    let Some(record) = registry.lookup(image) else {
        bail!("image not found: {} (referenced by {})", image, descriptor);
    };

    item.image_src = Some(record.canonical_url.clone());
    let srcset = record.srcset();
    item.image_srcset = (!srcset.is_empty()).then_some(srcset);
    Ok(())
}
