//! Mapping between image pixel space and on-screen view space.
//!
//! The host image view displays photos aspect-fit: the image is
//! scaled uniformly to fit the view and centered, leaving letterbox
//! margins on one axis. Detection results arrive in image pixel
//! coordinates, so every annotation has to pass through the transform
//! built here before it lines up with the displayed photo.

use splitfit_utils::Point;

/// The rectangle occupied by the image view on screen, in view points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayFrame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame anchored at the origin, the common case for an overlay
    /// layer pinned to its image view.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Uniform scale plus translation mapping image pixels to view points.
///
/// Always a pure function of the image size and display frame; it is
/// recomputed whenever either changes and carries no identity of its
/// own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Map an image-space point into view space.
    pub fn apply(&self, point: Point) -> Point {
        point.mul_add(self.scale, Point::new(self.offset_x, self.offset_y))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Build the aspect-fit transform from image pixel space into the
/// display frame.
///
/// The tighter-fitting axis picks the scale, and the scaled image is
/// centered inside the frame so the letterbox margins come out
/// non-negative and symmetric. Degenerate input (a zero image or
/// frame dimension) yields the identity transform.
///
/// # Arguments
///
/// * `image_size` - The displayed image's (width, height) in pixels.
/// * `frame` - The on-screen rectangle of the image view.
pub fn build_view_transform(image_size: (u32, u32), frame: DisplayFrame) -> ViewTransform {
    let (image_w, image_h) = image_size;
    if image_w == 0 || image_h == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return ViewTransform::IDENTITY;
    }

    let image_w = image_w as f32;
    let image_h = image_h as f32;
    let frame_aspect = frame.width / frame.height;
    let image_aspect = image_w / image_h;
    let scale = if frame_aspect > image_aspect {
        frame.height / image_h
    } else {
        frame.width / image_w
    };

    let scaled_w = image_w * scale;
    let scaled_h = image_h * scale;
    ViewTransform {
        offset_x: frame.x + (frame.width - scaled_w) / 2.0,
        offset_y: frame.y + (frame.height - scaled_h) / 2.0,
        scale,
    }
}

/// Scale multiplier keeping overlay stroke widths constant in screen
/// pixels while the image underneath is pinch-zoomed.
///
/// Applied to the overlay layer only, never the image layer. Returns
/// `1.0` for non-positive zoom factors rather than blowing up.
pub fn zoom_compensation(zoom: f32) -> f32 {
    if zoom <= 0.0 { 1.0 } else { 1.0 / zoom }
}
