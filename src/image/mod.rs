//! Raster image downscaling for the preview server.
//!
//! With `build.image_optimization` on, `folio serve` in server mode sends
//! PNG, JPEG and WebP images no wider than `build.image_max_width`. Export
//! mode always copies images verbatim.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;
use image::imageops::FilterType;

/// Downscaled image bytes, or `None` when the file is already narrow enough
/// or not a format we resize.
pub fn downscale(path: &Path, max_width: u32) -> Result<Option<Vec<u8>>> {
    let Ok(format) = ImageFormat::from_path(path) else {
        return Ok(None);
    };
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) {
        return Ok(None);
    }

    let img = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    if img.width() <= max_width {
        return Ok(None);
    }

    let resized = img.resize(max_width, u32::MAX, FilterType::Lanczos3);
    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, format)
        .with_context(|| format!("failed to encode {}", path.display()))?;

    crate::debug!(
        "image";
        "{} {}x{} -> {}x{}",
        path.display(),
        img.width(),
        img.height(),
        resized.width(),
        resized.height()
    );
    Ok(Some(out.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([120, 40, 200]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_wide_image_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 40, 20);

        let bytes = downscale(&path, 10).unwrap().unwrap();
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (10, 5));
    }

    #[test]
    fn test_narrow_image_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "small.png", 8, 8);
        assert!(downscale(&path, 10).unwrap().is_none());
    }

    #[test]
    fn test_other_formats_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF").unwrap();
        assert!(downscale(&path, 10).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(downscale(&path, 10).is_err());
    }
}
