//! URL path type for type-safe URL handling.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Browser boundary: Decode on input, encode on output

use std::borrow::Borrow;
use std::sync::Arc;

/// Decoded URL path (internal representation)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from browser URL (decode percent-encoding, strip query/fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_asset(&decoded)
    }

    /// Create asset URL (leading slash, no trailing-slash normalization).
    pub fn from_asset(decoded: &str) -> Self {
        let trimmed = decoded.trim();

        if trimmed.is_empty() {
            return Self(Arc::from("/"));
        }

        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };

        Self(Arc::from(normalized))
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

        /// Segment encode set: non-alphanumerics except `.` and `-`.
        const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-');

        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_asset(s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_decodes() {
        let url = UrlPath::from_browser("/static/hello%20world.png");
        assert_eq!(url.as_str(), "/static/hello world.png");
    }

    #[test]
    fn test_from_browser_strips_query() {
        let url = UrlPath::from_browser("/static/abc.png?v=1");
        assert_eq!(url.as_str(), "/static/abc.png");
    }

    #[test]
    fn test_from_browser_strips_fragment() {
        let url = UrlPath::from_browser("/static/abc.png#top");
        assert_eq!(url.as_str(), "/static/abc.png");
    }

    #[test]
    fn test_from_browser_invalid_utf8() {
        // Invalid UTF-8 sequence should be preserved
        let url = UrlPath::from_browser("/static/%FF");
        assert_eq!(url.as_str(), "/static/%FF");
    }

    #[test]
    fn test_from_asset_adds_leading_slash() {
        let url = UrlPath::from_asset("static/logo.png");
        assert_eq!(url.as_str(), "/static/logo.png");
    }

    #[test]
    fn test_from_asset_no_trailing_slash_added() {
        let url = UrlPath::from_asset("/static/logo.png");
        assert_eq!(url.as_str(), "/static/logo.png");
    }

    #[test]
    fn test_to_encoded_space() {
        let url = UrlPath::from_asset("/static/hello world.png");
        assert_eq!(url.to_encoded(), "/static/hello%20world.png");
    }

    #[test]
    fn test_equality() {
        let url1 = UrlPath::from_asset("/static/a.png");
        let url2 = UrlPath::from_asset("/static/a.png");
        let url3 = UrlPath::from_asset("/static/b.png");

        assert_eq!(url1, url2);
        assert_ne!(url1, url3);
    }

    #[test]
    fn test_borrow_lookup() {
        use rustc_hash::FxHashMap;

        let mut map: FxHashMap<UrlPath, u32> = FxHashMap::default();
        map.insert(UrlPath::from_asset("/static/a.png"), 1);

        // Borrow<str> allows lookup by &str without allocating
        assert_eq!(map.get("/static/a.png"), Some(&1));
        assert_eq!(map.get("/static/missing.png"), None);
    }

}
