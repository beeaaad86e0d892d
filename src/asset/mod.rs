//! Static asset content-addressing and responsive-derivative pipeline.
//!
//! Scans the asset root, computes a content digest per file, produces
//! resized variants for raster images, and registers an immutable URL
//! for every artifact. The result is returned by value: an
//! [`AssetRegistry`] mapping logical paths to records, plus the
//! [`RouteTable`] the server resolves requests against. Neither is
//! mutated after `build` returns.
//!
//! Any failure on any asset aborts the whole build - no partial index
//! is ever published.

mod digest;
mod registry;
mod routes;
pub mod scan;
mod variant;

pub use digest::ContentDigest;
pub use registry::{AssetRecord, AssetRegistry, Variant};
pub use routes::RouteTable;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinSet;

use crate::config::SiteConfig;
use crate::core::UrlPath;
use crate::{debug, log};

/// URL prefix for all content-addressed artifacts.
const STATIC_PREFIX: &str = "/static";

/// Per-source output of the concurrent phase, folded into the registry
/// and route table after the join barrier.
struct ProcessedAsset {
    logical: String,
    canonical_url: UrlPath,
    variants: Vec<Variant>,
    /// Artifact bindings; registered before the record so no canonical
    /// URL is ever published without a servable route behind it.
    bindings: Vec<(UrlPath, PathBuf)>,
}

/// Run the full pipeline over the configured asset root.
///
/// Every source is processed concurrently (read → digest → branch:
/// derivatives or passthrough); the call suspends on a join-all barrier
/// and fails fast on the first error.
pub fn build(config: &SiteConfig) -> Result<(AssetRegistry, RouteTable)> {
    let sources = scan::enumerate(&config.content.assets)?;

    let arena = tempfile::TempDir::new().context("failed to create derivative arena")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create pipeline runtime")?;
    let processed = runtime.block_on(process_all(sources, arena.path().to_path_buf()))?;

    let mut registry = AssetRegistry::new(arena);
    let mut routes = RouteTable::default();
    for asset in processed {
        for (url, source) in asset.bindings {
            routes.register(url, source);
        }
        debug!("assets"; "{} -> {}", asset.logical, asset.canonical_url);
        registry.insert(
            asset.logical,
            AssetRecord {
                canonical_url: asset.canonical_url,
                variants: asset.variants,
            },
        );
    }

    log!("assets"; "indexed {} sources ({} routes)", registry.len(), routes.len());
    Ok((registry, routes))
}

/// Spawn one task per source and join them all.
///
/// No bound on in-flight assets: each task holds its full file content
/// in memory, acceptable while catalogs stay small.
async fn process_all(
    sources: Vec<scan::SourceFile>,
    arena: PathBuf,
) -> Result<Vec<ProcessedAsset>> {
    let mut tasks = JoinSet::new();
    for source in sources {
        let arena = arena.clone();
        tasks.spawn(process_source(source, arena));
    }

    let mut processed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        // Returning on the first error drops the set and aborts the rest
        processed.push(joined.context("asset task panicked")??);
    }
    Ok(processed)
}

/// Read, digest, and branch a single source file.
async fn process_source(source: scan::SourceFile, arena: PathBuf) -> Result<ProcessedAsset> {
    let bytes = tokio::fs::read(&source.path)
        .await
        .with_context(|| format!("failed to read asset {}", source.logical))?;

    let digest = ContentDigest::compute(&bytes);
    let ext = extension_of(&source.path);
    let base_url = format!("{}/{}", STATIC_PREFIX, digest.to_hex());

    if variant::is_raster(&ext) {
        let generated = variant::generate(bytes, &ext, &base_url, &arena, &source.logical).await?;

        let canonical_url = generated
            .iter()
            .find(|g| g.default)
            .map(|g| g.url.clone())
            .context("no default preset configured")?;
        let variants = generated
            .iter()
            .map(|g| Variant {
                url: g.url.clone(),
                width: g.width,
            })
            .collect();
        let bindings = generated.into_iter().map(|g| (g.url, g.file)).collect();

        Ok(ProcessedAsset {
            logical: source.logical,
            canonical_url,
            variants,
            bindings,
        })
    } else {
        let url = UrlPath::from_asset(&format!("{}{}", base_url, ext));
        Ok(ProcessedAsset {
            logical: source.logical,
            canonical_url: url.clone(),
            variants: Vec::new(),
            bindings: vec![(url, source.path)],
        })
    }
}

/// File extension with leading dot, or empty when there is none.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
