use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::config::ResizeQuality;

/// Load an image from disk into memory.
///
/// # Arguments
///
/// * `path` - The path to the image file.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path_ref = path.as_ref();
    image::open(path_ref).with_context(|| format!("failed to open image {}", path_ref.display()))
}

/// Compute the largest size that fits `source` inside `bounds` while
/// preserving aspect ratio.
///
/// Returns an error when either rectangle has zero area; callers are
/// expected to fall back to the unscaled source in that case.
///
/// # Arguments
///
/// * `source` - The source (width, height) in pixels.
/// * `bounds` - The bounding (width, height) in pixels.
pub fn aspect_fit_size(source: (u32, u32), bounds: (u32, u32)) -> Result<(u32, u32)> {
    let (src_w, src_h) = source;
    let (bound_w, bound_h) = bounds;
    anyhow::ensure!(src_w > 0 && src_h > 0, "source dimensions must be non-zero");
    anyhow::ensure!(
        bound_w > 0 && bound_h > 0,
        "bounding dimensions must be non-zero"
    );

    let scale = (bound_w as f64 / src_w as f64).min(bound_h as f64 / src_h as f64);
    let width = ((src_w as f64 * scale).round() as u32).max(1);
    let height = ((src_h as f64 * scale).round() as u32).max(1);
    Ok((width, height))
}

/// Resize an image so it fits within `bounds` without distortion.
///
/// The underlying resize preserves aspect ratio, so the result may
/// letterbox against the bounds on one axis.
///
/// # Arguments
///
/// * `image` - The image to resize.
/// * `bounds` - The bounding (width, height) in pixels.
/// * `quality` - Sampling quality for the resize filter.
pub fn scale_to_fit(
    image: &DynamicImage,
    bounds: (u32, u32),
    quality: ResizeQuality,
) -> Result<DynamicImage> {
    let (width, height) = aspect_fit_size((image.width(), image.height()), bounds)?;
    Ok(image.resize(width, height, quality.filter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_fit_is_width_bound_for_wide_sources() {
        // 400x300 into 200x200: width is the tighter axis.
        let (w, h) = aspect_fit_size((400, 300), (200, 200)).unwrap();
        assert_eq!((w, h), (200, 150));
    }

    #[test]
    fn aspect_fit_is_height_bound_for_tall_sources() {
        let (w, h) = aspect_fit_size((300, 400), (200, 200)).unwrap();
        assert_eq!((w, h), (150, 200));
    }

    #[test]
    fn aspect_fit_rejects_zero_area() {
        assert!(aspect_fit_size((0, 300), (200, 200)).is_err());
        assert!(aspect_fit_size((400, 300), (200, 0)).is_err());
    }

    #[test]
    fn scale_to_fit_never_distorts() {
        let image = DynamicImage::new_rgb8(640, 480);
        let scaled = scale_to_fit(&image, (100, 100), ResizeQuality::Speed).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (100, 75));
    }

    #[test]
    fn scale_to_fit_fails_on_empty_source() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(scale_to_fit(&image, (100, 100), ResizeQuality::Speed).is_err());
    }
}
