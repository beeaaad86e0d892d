//! Source enumeration (pure, no side effects).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A regular file found under the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Root-relative path with `/` separators, the registry key.
    pub logical: String,
}

/// Enumerate all regular files nested at any depth under `root`.
///
/// Files and directories whose name starts with `.` are skipped.
/// Fails if the root (or any directory below it) cannot be read - the
/// index must be complete, so a partial walk is an error, not a result.
///
/// # Pure Function
///
/// This function only reads the filesystem and returns data
pub fn enumerate(root: &Path) -> Result<Vec<SourceFile>> {
    let mut results = Vec::new();
    enumerate_recursive(&mut results, root, root)?;
    Ok(results)
}

fn enumerate_recursive(results: &mut Vec<SourceFile>, dir: &Path, root: &Path) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if is_hidden(&path) {
            continue;
        }

        if path.is_dir() {
            enumerate_recursive(results, &path, root)?;
        } else if path.is_file() {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            results.push(SourceFile {
                logical: crate::utils::path::to_logical(rel),
                path,
            });
        }
    }

    Ok(())
}

/// A file or directory is hidden when its name starts with `.`.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_nested() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("logo.png"), "png").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/rules.pdf"), "pdf").unwrap();

        let mut files = enumerate(root).unwrap();
        files.sort_by(|a, b| a.logical.cmp(&b.logical));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].logical, "docs/rules.pdf");
        assert_eq!(files[1].logical, "logo.png");
        assert!(files.iter().all(|f| f.path.is_absolute()));
    }

    #[test]
    fn test_enumerate_skips_hidden() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("visible.txt"), "a").unwrap();
        fs::write(root.join(".hidden"), "b").unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/config"), "c").unwrap();

        let files = enumerate(root).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].logical, "visible.txt");
    }

    #[test]
    fn test_enumerate_unreadable_root() {
        let result = enumerate(Path::new("/nonexistent/asset/root"));
        assert!(result.is_err());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("/nonexistent/asset/root"));
    }

    #[test]
    fn test_logical_paths_use_forward_slashes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/deep.txt"), "x").unwrap();

        let files = enumerate(root).unwrap();
        assert_eq!(files[0].logical, "a/b/deep.txt");
    }
}
