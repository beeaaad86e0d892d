//! Route table: URL → byte source.
//!
//! One generic lookup table instead of a handler per artifact. The
//! server resolves every request against it; the pipeline dictates
//! which URLs exist and what they serve.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::UrlPath;

/// Write-once mapping from a fully-formed URL to the file serving it.
///
/// Bindings never change for the process lifetime, which is what makes
/// `Cache-Control: immutable` sound for everything under `/static/`.
#[derive(Debug, Default)]
pub struct RouteTable {
    bindings: FxHashMap<UrlPath, PathBuf>,
}

impl RouteTable {
    /// Register a binding. First write wins: URLs derive from content
    /// digests, so a second registration for the same URL necessarily
    /// carries identical bytes and is harmless to drop.
    pub(crate) fn register(&mut self, url: UrlPath, source: PathBuf) {
        self.bindings.entry(url).or_insert(source);
    }

    /// Resolve a URL to its byte source.
    pub fn resolve(&self, url: &str) -> Option<&Path> {
        self.bindings.get(url).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
