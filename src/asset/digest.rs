//! Content digests using blake3.
//!
//! A digest is a pure function of a file's bytes and is the basis of
//! every public URL the pipeline registers: identical content yields
//! identical URLs regardless of file name or directory.

/// A 256-bit content digest (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Compute the digest of a byte buffer.
    ///
    /// The pipeline reads each file fully into memory before hashing;
    /// callers are expected to hold the whole content. This rules out
    /// arbitrarily large files, a known and accepted limitation.
    pub fn compute(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to the full lowercase hex string used in URLs.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_digest_pure_function_of_content() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("logo.png");
        let b = dir.path().join("nested").join("copy.bin");
        fs::create_dir_all(b.parent().unwrap()).unwrap();
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        // Identical bytes yield identical digests regardless of name or dir
        let da = ContentDigest::compute(&fs::read(&a).unwrap());
        let db = ContentDigest::compute(&fs::read(&b).unwrap());
        assert_eq!(da, db);

        let dc = ContentDigest::compute(b"different bytes");
        assert_ne!(da, dc);
    }

    #[test]
    fn test_hex_is_64_lowercase_chars() {
        let digest = ContentDigest::compute(b"content");
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_display_short_form() {
        let digest = ContentDigest::compute(b"content");
        assert_eq!(format!("{}", digest), &digest.to_hex()[..16]);
    }
}
