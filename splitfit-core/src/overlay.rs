//! Annotation primitives derived from detection results.
//!
//! Each detection cycle regenerates the full primitive set from
//! scratch; nothing is updated incrementally and previous primitives
//! are discarded wholesale. The host only has to paint whatever the
//! current [`OverlayScene`] holds.

use splitfit_utils::{OverlaySettings, Point, RgbaColor};

use crate::detector::Pose;
use crate::skeleton::CONNECTIONS;
use crate::transform::{ViewTransform, zoom_compensation};

/// Visual parameters for annotation primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub dot_radius: f32,
    pub line_width: f32,
    pub dot_color: RgbaColor,
    pub line_color: RgbaColor,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from(&OverlaySettings::default())
    }
}

impl From<&OverlaySettings> for OverlayStyle {
    fn from(settings: &OverlaySettings) -> Self {
        Self {
            dot_radius: settings.dot_radius,
            line_width: settings.line_width,
            dot_color: settings.dot_color,
            line_color: settings.line_color,
        }
    }
}

/// A renderable shape in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPrimitive {
    /// Filled marker at a landmark position.
    Dot {
        center: Point,
        radius: f32,
        color: RgbaColor,
    },
    /// Line joining two connected landmarks.
    Segment {
        start: Point,
        end: Point,
        width: f32,
        color: RgbaColor,
    },
}

/// Generate the full primitive set for the given poses.
///
/// Every landmark at or above `score_threshold` becomes a dot, and a
/// skeletal connection becomes a segment only when both of its
/// endpoints survive the threshold. Dropping a landmark therefore
/// also drops every edge touching it.
///
/// # Arguments
///
/// * `poses` - Detection results in image pixel space.
/// * `transform` - The image-to-view transform for the displayed photo.
/// * `style` - Visual parameters for the emitted primitives.
/// * `score_threshold` - Minimum landmark confidence to render.
pub fn build_overlay(
    poses: &[Pose],
    transform: &ViewTransform,
    style: &OverlayStyle,
    score_threshold: f32,
) -> Vec<OverlayPrimitive> {
    let mut primitives = Vec::new();
    for pose in poses {
        for &(from, to) in CONNECTIONS {
            let Some(start) = pose.scored_landmark(from, score_threshold) else {
                continue;
            };
            let Some(end) = pose.scored_landmark(to, score_threshold) else {
                continue;
            };
            primitives.push(OverlayPrimitive::Segment {
                start: transform.apply(start.position),
                end: transform.apply(end.position),
                width: style.line_width,
                color: style.line_color,
            });
        }
        for landmark in &pose.landmarks {
            if landmark.score < score_threshold {
                continue;
            }
            primitives.push(OverlayPrimitive::Dot {
                center: transform.apply(landmark.position),
                radius: style.dot_radius,
                color: style.dot_color,
            });
        }
    }
    primitives
}

/// The currently displayed annotation set plus its zoom compensation.
///
/// The primitive list is only ever replaced as a whole, so from the
/// painting side each detection cycle appears atomic.
#[derive(Debug, Clone)]
pub struct OverlayScene {
    primitives: Vec<OverlayPrimitive>,
    zoom_scale: f32,
}

impl Default for OverlayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayScene {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            zoom_scale: 1.0,
        }
    }

    pub fn primitives(&self) -> &[OverlayPrimitive] {
        &self.primitives
    }

    /// Extra uniform scale the host applies to the overlay layer so
    /// strokes stay constant in screen pixels under zoom.
    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    /// Discard every primitive, leaving zoom compensation untouched.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Swap in a freshly generated primitive set.
    pub fn replace(&mut self, primitives: Vec<OverlayPrimitive>) {
        self.primitives = primitives;
    }

    /// Recompute the compensation multiplier for a new zoom factor.
    /// Must run on every zoom-gesture update.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom_scale = zoom_compensation(zoom);
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
