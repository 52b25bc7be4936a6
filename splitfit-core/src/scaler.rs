//! Display scaling step of the detection cycle.
//!
//! Large photos are resized down to the display frame before
//! detection so the rest of the cycle (detector input, transform
//! inputs) works from the final displayed dimensions. The step runs
//! on the background worker; the result is handed back to the
//! interactive context before anything is shown.

use image::DynamicImage;
use log::{Level, warn};
use splitfit_utils::{ResizeQuality, scale_to_fit, timing_guard};

use crate::transform::DisplayFrame;

/// Resize a photo so it fits the display frame while preserving
/// aspect ratio.
///
/// When scaling is not possible (a degenerate source or frame) the
/// original image is returned unchanged, matching the screen's
/// fall-back-to-the-original behavior.
///
/// # Arguments
///
/// * `image` - The photo as delivered by the external picker.
/// * `frame` - The on-screen rectangle the photo will occupy.
/// * `quality` - Sampling quality for the resize filter.
pub fn scale_for_display(
    image: &DynamicImage,
    frame: DisplayFrame,
    quality: ResizeQuality,
) -> DynamicImage {
    let _guard = timing_guard("splitfit_core::scale_for_display", Level::Debug);

    let bounds = (
        frame.width.max(0.0).round() as u32,
        frame.height.max(0.0).round() as u32,
    );
    match scale_to_fit(image, bounds, quality) {
        Ok(scaled) => scaled,
        Err(err) => {
            warn!("display scaling failed ({err}); using the original image");
            image.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_down_into_the_frame() {
        let image = DynamicImage::new_rgb8(400, 300);
        let scaled = scale_for_display(
            &image,
            DisplayFrame::sized(200.0, 200.0),
            ResizeQuality::Speed,
        );
        assert_eq!((scaled.width(), scaled.height()), (200, 150));
    }

    #[test]
    fn falls_back_to_original_on_zero_frame() {
        let image = DynamicImage::new_rgb8(400, 300);
        let scaled = scale_for_display(
            &image,
            DisplayFrame::sized(0.0, 0.0),
            ResizeQuality::Quality,
        );
        assert_eq!((scaled.width(), scaled.height()), (400, 300));
    }

    #[test]
    fn falls_back_to_original_on_empty_source() {
        let image = DynamicImage::new_rgb8(0, 0);
        let scaled = scale_for_display(
            &image,
            DisplayFrame::sized(200.0, 200.0),
            ResizeQuality::Quality,
        );
        assert_eq!(scaled.width(), 0);
    }
}
