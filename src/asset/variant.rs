//! Responsive derivative generation for raster images.
//!
//! Every raster asset is resized to a fixed set of preset widths. The
//! variants are written into the registry's temporary arena and served
//! through content-addressed URLs, so they are immutable for the life
//! of the process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use image::imageops::FilterType;

use crate::core::UrlPath;

/// One derivative target.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Target width in pixels; also the URL segment for the variant.
    pub width: u32,
    /// Explicit height override; derived from the width when absent.
    pub height: Option<u32>,
    /// The default preset's URL becomes the record's canonical URL.
    pub default: bool,
}

/// Fixed presets: large, medium, small. The smallest is the default.
pub const PRESETS: [Preset; 3] = [
    Preset { width: 1200, height: None, default: false },
    Preset { width: 800, height: None, default: false },
    Preset { width: 400, height: None, default: true },
];

impl Preset {
    /// Target height: fixed 2:3 width:height ratio unless overridden.
    pub fn target_height(&self) -> u32 {
        self.height.unwrap_or(self.width * 2 / 3)
    }
}

/// Check whether an extension (with leading dot) names a raster format
/// the pipeline resizes. Everything else passes through unresized.
pub fn is_raster(ext: &str) -> bool {
    ext.eq_ignore_ascii_case(".png")
        || ext.eq_ignore_ascii_case(".jpg")
        || ext.eq_ignore_ascii_case(".jpeg")
}

/// A produced derivative.
#[derive(Debug)]
pub struct Generated {
    pub url: UrlPath,
    pub width: u32,
    /// Variant file inside the arena.
    pub file: PathBuf,
    pub default: bool,
}

/// Resize `bytes` to every preset, writing each variant into the arena.
///
/// The source is decoded once; presets resize concurrently on blocking
/// threads. Variants are returned in preset declaration order. Any
/// decode, resize, or write failure is fatal for the whole build.
pub async fn generate(
    bytes: Vec<u8>,
    ext: &str,
    base_url: &str,
    arena: &Path,
    logical: &str,
) -> Result<Vec<Generated>> {
    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await?
        .with_context(|| format!("failed to decode image {}", logical))?;
    let decoded = Arc::new(decoded);

    let mut handles = Vec::with_capacity(PRESETS.len());
    for preset in PRESETS {
        let image = Arc::clone(&decoded);
        let arena = arena.to_path_buf();
        let ext = ext.to_string();
        let logical = logical.to_string();

        handles.push(tokio::task::spawn_blocking(move || {
            resize_to_arena(&image, preset, &ext, &arena, &logical)
        }));
    }

    let mut variants = Vec::with_capacity(PRESETS.len());
    for (preset, handle) in PRESETS.iter().zip(handles) {
        let file = handle.await??;
        variants.push(Generated {
            url: UrlPath::from_asset(&format!("{}/{}{}", base_url, preset.width, ext)),
            width: preset.width,
            file,
            default: preset.default,
        });
    }

    Ok(variants)
}

/// Resize one preset and write it to a uniquely named file in the arena.
///
/// Unique names avoid write races when identical source content shows up
/// under two logical paths and both produce the same digest concurrently.
fn resize_to_arena(
    image: &image::DynamicImage,
    preset: Preset,
    ext: &str,
    arena: &Path,
    logical: &str,
) -> Result<PathBuf> {
    let (_, path) = tempfile::Builder::new()
        .prefix(&format!("{}-", preset.width))
        .suffix(ext)
        .tempfile_in(arena)
        .with_context(|| format!("failed to allocate variant file for {}", logical))?
        .keep()
        .with_context(|| format!("failed to retain variant file for {}", logical))?;

    let resized = image.resize_exact(preset.width, preset.target_height(), FilterType::Lanczos3);
    resized
        .save(&path)
        .with_context(|| format!("failed to write {}px variant of {}", preset.width, logical))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_height_ratio() {
        // height = floor(width * 2 / 3)
        assert_eq!(PRESETS[0].target_height(), 800);
        assert_eq!(PRESETS[1].target_height(), 533);
        assert_eq!(PRESETS[2].target_height(), 266);
    }

    #[test]
    fn test_target_height_explicit_override() {
        let preset = Preset {
            width: 400,
            height: Some(100),
            default: false,
        };
        assert_eq!(preset.target_height(), 100);
    }

    #[test]
    fn test_exactly_one_default_preset() {
        let defaults: Vec<_> = PRESETS.iter().filter(|p| p.default).collect();
        assert_eq!(defaults.len(), 1);

        // The default is the smallest width
        let smallest = PRESETS.iter().map(|p| p.width).min().unwrap();
        assert_eq!(defaults[0].width, smallest);
    }

    #[test]
    fn test_preset_widths_distinct() {
        let mut widths: Vec<_> = PRESETS.iter().map(|p| p.width).collect();
        widths.dedup();
        assert_eq!(widths.len(), PRESETS.len());
    }

    #[test]
    fn test_is_raster() {
        assert!(is_raster(".png"));
        assert!(is_raster(".jpg"));
        assert!(is_raster(".jpeg"));
        assert!(is_raster(".PNG"));
        assert!(!is_raster(".gif"));
        assert!(!is_raster(".svg"));
        assert!(!is_raster(".pdf"));
        assert!(!is_raster(""));
    }
}
