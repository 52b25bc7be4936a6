//! Abstraction over the external pose-detection backend.
//!
//! The estimation algorithm itself is an opaque collaborator; this
//! module only defines the contract it must satisfy so that any
//! backend can be substituted without touching the geometry core.

use std::sync::Arc;

use image::DynamicImage;
use splitfit_utils::Point;
use thiserror::Error;

/// Identifiers for the 33 body landmarks reported by full-body pose
/// estimation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkKind {
    /// Every landmark kind, in backend reporting order.
    pub const ALL: [LandmarkKind; 33] = [
        LandmarkKind::Nose,
        LandmarkKind::LeftEyeInner,
        LandmarkKind::LeftEye,
        LandmarkKind::LeftEyeOuter,
        LandmarkKind::RightEyeInner,
        LandmarkKind::RightEye,
        LandmarkKind::RightEyeOuter,
        LandmarkKind::LeftEar,
        LandmarkKind::RightEar,
        LandmarkKind::MouthLeft,
        LandmarkKind::MouthRight,
        LandmarkKind::LeftShoulder,
        LandmarkKind::RightShoulder,
        LandmarkKind::LeftElbow,
        LandmarkKind::RightElbow,
        LandmarkKind::LeftWrist,
        LandmarkKind::RightWrist,
        LandmarkKind::LeftPinky,
        LandmarkKind::RightPinky,
        LandmarkKind::LeftIndex,
        LandmarkKind::RightIndex,
        LandmarkKind::LeftThumb,
        LandmarkKind::RightThumb,
        LandmarkKind::LeftHip,
        LandmarkKind::RightHip,
        LandmarkKind::LeftKnee,
        LandmarkKind::RightKnee,
        LandmarkKind::LeftAnkle,
        LandmarkKind::RightAnkle,
        LandmarkKind::LeftHeel,
        LandmarkKind::RightHeel,
        LandmarkKind::LeftFootIndex,
        LandmarkKind::RightFootIndex,
    ];
}

/// A labeled, confidence-scored 2D point produced by pose detection.
///
/// Positions are expressed in the pixel space of the image that was
/// handed to the detector. Read-only to the geometry core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub position: Point,
    /// Confidence score in `0.0..=1.0`.
    pub score: f32,
}

/// A single detected pose: one landmark set for one person.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pose {
    pub landmarks: Vec<Landmark>,
}

impl Pose {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Look up a landmark by kind.
    pub fn landmark(&self, kind: LandmarkKind) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.kind == kind)
    }

    /// Look up a landmark by kind, requiring at least `threshold` confidence.
    pub fn scored_landmark(&self, kind: LandmarkKind, threshold: f32) -> Option<&Landmark> {
        self.landmark(kind).filter(|lm| lm.score >= threshold)
    }
}

/// Failure modes of a detection cycle.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The photo could not be converted into the backend's input form.
    #[error("failed to convert the image for detection; try another photo")]
    ImageConversion,
    /// The backend ran but found no poses.
    #[error("no results returned")]
    NoResults,
    /// The backend reported an internal error.
    #[error("pose backend error: {0}")]
    Backend(String),
}

/// Contract for an on-device pose-detection backend.
///
/// Implementations receive the final display-scaled image and return
/// every detected pose, or an error that is terminal for the current
/// detection cycle.
pub trait PoseDetector: Send {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Pose>, DetectError>;
}

/// Builds a fresh, exclusively-owned detector for one detection cycle.
///
/// Each cycle constructs and disposes its own detector so no internal
/// backend state carries over between photos.
pub type DetectorFactory = Arc<dyn Fn() -> anyhow::Result<Box<dyn PoseDetector>> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_lookup_by_kind() {
        let pose = Pose::new(vec![
            Landmark {
                kind: LandmarkKind::LeftHip,
                position: Point::new(10.0, 20.0),
                score: 0.9,
            },
            Landmark {
                kind: LandmarkKind::RightHip,
                position: Point::new(30.0, 20.0),
                score: 0.4,
            },
        ]);
        assert!(pose.landmark(LandmarkKind::LeftHip).is_some());
        assert!(pose.landmark(LandmarkKind::Nose).is_none());
    }

    #[test]
    fn scored_lookup_applies_threshold() {
        let pose = Pose::new(vec![Landmark {
            kind: LandmarkKind::RightHip,
            position: Point::ZERO,
            score: 0.4,
        }]);
        assert!(pose.scored_landmark(LandmarkKind::RightHip, 0.75).is_none());
        assert!(pose.scored_landmark(LandmarkKind::RightHip, 0.4).is_some());
    }

    #[test]
    fn all_kinds_are_distinct() {
        use std::collections::HashSet;
        let kinds: HashSet<_> = LandmarkKind::ALL.iter().collect();
        assert_eq!(kinds.len(), LandmarkKind::ALL.len());
    }
}
