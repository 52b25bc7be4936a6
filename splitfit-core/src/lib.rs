//! Core geometry and orchestration for the split-flexibility screen.
//!
//! This crate maps pose-detection output onto a displayed photo: it
//! scales images aspect-fit for display, builds the image-to-view
//! transform, turns landmarks into overlay primitives, compensates
//! for interactive zoom, and drives the whole cycle around an
//! abstract detection backend.

/// Split-angle measurement from a detected pose.
pub mod angle;
/// Static data for the flexibility progress chart.
pub mod chart;
/// Abstraction over the external pose-detection backend.
pub mod detector;
/// Annotation primitives derived from detection results.
pub mod overlay;
/// Display scaling step of the detection cycle.
pub mod scaler;
/// Detection cycle orchestration.
pub mod session;
/// Skeletal adjacency for full-body landmark sets.
pub mod skeleton;
/// Image-to-view coordinate mapping.
pub mod transform;

pub use angle::{FULL_SPLIT_DEGREES, split_angle};
pub use chart::{ChartSeries, SplitKind, flexibility_series};
pub use detector::{DetectError, DetectorFactory, Landmark, LandmarkKind, Pose, PoseDetector};
pub use overlay::{OverlayPrimitive, OverlayScene, OverlayStyle, build_overlay};
pub use scaler::scale_for_display;
pub use session::{CycleReport, DetectionJobOutput, DetectionSession, JobMessage};
pub use skeleton::CONNECTIONS;
pub use transform::{DisplayFrame, ViewTransform, build_view_transform, zoom_compensation};

/// Returns the crate version for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
