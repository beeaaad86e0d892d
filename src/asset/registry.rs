//! Asset registry: logical path → record of immutable URLs.

use rustc_hash::FxHashMap;
use tempfile::TempDir;

use crate::core::UrlPath;

/// One resolution alternative for a responsive image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub url: UrlPath,
    pub width: u32,
}

/// Everything a consumer needs to reference one asset.
///
/// Immutable once inserted: the registry is built once at startup and
/// never written again, which is what makes post-build reads lock-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// The default URL for this asset. For images this is the default
    /// derivative's URL; for everything else the passthrough URL.
    pub canonical_url: UrlPath,

    /// Resolution alternatives in preset declaration order; empty for
    /// non-image assets.
    pub variants: Vec<Variant>,
}

impl AssetRecord {
    /// Render the `srcset` attribute value: `"<url> <width>w"` pairs
    /// joined by `", "`. Empty for non-image assets.
    pub fn srcset(&self) -> String {
        self.variants
            .iter()
            .map(|v| format!("{} {}w", v.url, v.width))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The pipeline's public output: logical source path → [`AssetRecord`].
///
/// Owns the temporary arena holding the derivative files, so dropping
/// the registry (graceful shutdown or process exit) removes them.
#[derive(Debug)]
pub struct AssetRegistry {
    records: FxHashMap<String, AssetRecord>,
    /// Held, never read: dropping the registry removes the derivatives.
    arena: TempDir,
}

impl AssetRegistry {
    pub(crate) fn new(arena: TempDir) -> Self {
        Self {
            records: FxHashMap::default(),
            arena,
        }
    }

    pub(crate) fn insert(&mut self, logical: String, record: AssetRecord) {
        self.records.insert(logical, record);
    }

    /// Look up the record for a logical source path.
    ///
    /// `None` is the "not found" signal collaborators rely on to fail
    /// fast when a descriptor references an unknown asset.
    pub fn lookup(&self, logical: &str) -> Option<&AssetRecord> {
        self.records.get(logical)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all (logical path, record) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}
