//! Split-angle measurement from a detected pose.
//!
//! The flexibility screen reports how close a split is to flat: the
//! angle at the hip midpoint between the two hip-to-ankle rays, where
//! 180 degrees is a full split.

use splitfit_utils::Point;

use crate::detector::{LandmarkKind, Pose};

/// Angle of a perfectly flat split, in degrees.
pub const FULL_SPLIT_DEGREES: f32 = 180.0;

/// Measure the split angle of a pose, in degrees.
///
/// Returns `None` when either hip or ankle is missing or falls below
/// `score_threshold`, or when a leg collapses to zero length.
///
/// # Arguments
///
/// * `pose` - The detected pose, in any consistent coordinate space.
/// * `score_threshold` - Minimum landmark confidence to trust.
pub fn split_angle(pose: &Pose, score_threshold: f32) -> Option<f32> {
    let left_hip = pose.scored_landmark(LandmarkKind::LeftHip, score_threshold)?;
    let right_hip = pose.scored_landmark(LandmarkKind::RightHip, score_threshold)?;
    let left_ankle = pose.scored_landmark(LandmarkKind::LeftAnkle, score_threshold)?;
    let right_ankle = pose.scored_landmark(LandmarkKind::RightAnkle, score_threshold)?;

    let pivot = left_hip.position.midpoint(right_hip.position);
    angle_between(
        left_ankle.position - pivot,
        right_ankle.position - pivot,
    )
}

/// Angle between two vectors in degrees, `None` for zero-length input.
fn angle_between(a: Point, b: Point) -> Option<f32> {
    let len_a = a.hypot();
    let len_b = b.hypot();
    if len_a <= f32::EPSILON || len_b <= f32::EPSILON {
        return None;
    }
    let cos = ((a * b) / (len_a * len_b)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
