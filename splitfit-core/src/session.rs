//! Detection cycle orchestration.
//!
//! One [`DetectionSession`] drives the scale → detect → transform →
//! overlay pipeline for the host screen. Scaling and detection run on
//! a background worker; everything display-affecting happens when the
//! interactive context calls [`DetectionSession::poll`]. Each request
//! gets a monotonically increasing job id and only the latest issued
//! job is allowed to mutate the scene, so a stale completion from a
//! superseded request is discarded instead of racing a newer one.

use std::sync::mpsc;

use image::DynamicImage;
use log::{Level, error, info};
use splitfit_utils::{AppSettings, timing_guard};

use crate::angle::split_angle;
use crate::detector::{DetectError, DetectorFactory, Pose};
use crate::overlay::{OverlayScene, OverlayStyle, build_overlay};
use crate::scaler::scale_for_display;
use crate::transform::{DisplayFrame, build_view_transform};

/// The data produced by a successful background detection job.
pub struct DetectionJobOutput {
    /// The display-scaled photo; transform inputs come from its
    /// final dimensions.
    pub display_image: DynamicImage,
    /// Raw poses in the scaled image's pixel space.
    pub poses: Vec<Pose>,
}

/// A message sent from a background detection job to the interactive
/// context.
pub enum JobMessage {
    /// A detection job finished successfully.
    DetectionFinished {
        job_id: u64,
        data: DetectionJobOutput,
    },
    /// A detection job failed; terminal for that cycle.
    DetectionFailed { job_id: u64, error: String },
}

/// Aggregated outcome of one detection cycle, shown once by the host
/// regardless of how many poses were found.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleReport {
    PosesDetected {
        count: usize,
        /// Measured split angle in degrees, when the leg landmarks
        /// were confident enough.
        split_angle: Option<f32>,
    },
    Failed {
        message: String,
    },
}

impl CycleReport {
    /// Human-readable summary for the host's message dialog.
    pub fn message(&self) -> String {
        match self {
            CycleReport::PosesDetected { count, split_angle } => {
                let mut msg = if *count == 1 {
                    "Split pose detected".to_string()
                } else {
                    format!("{count} poses detected")
                };
                if let Some(angle) = split_angle {
                    msg.push_str(&format!("; split angle {angle:.0}\u{b0}"));
                }
                msg
            }
            CycleReport::Failed { message } => format!("Split detection failed: {message}"),
        }
    }
}

/// Owns the detection pipeline state for one screen.
pub struct DetectionSession {
    factory: DetectorFactory,
    job_tx: mpsc::Sender<JobMessage>,
    job_rx: mpsc::Receiver<JobMessage>,
    job_counter: u64,
    current_job: Option<u64>,
    scene: OverlayScene,
    display_image: Option<DynamicImage>,
    report: Option<CycleReport>,
}

impl DetectionSession {
    /// Create a session around a detector factory. The factory is
    /// invoked once per cycle so every request runs against a fresh,
    /// exclusively-owned detector.
    pub fn new(factory: DetectorFactory) -> Self {
        let (job_tx, job_rx) = mpsc::channel();
        Self {
            factory,
            job_tx,
            job_rx,
            job_counter: 0,
            current_job: None,
            scene: OverlayScene::new(),
            display_image: None,
            report: None,
        }
    }

    /// Start a new detection cycle for a freshly picked photo.
    ///
    /// Clears the previous annotations, then hands the scale → detect
    /// steps to the background worker. Results arrive through
    /// [`DetectionSession::poll`].
    ///
    /// # Arguments
    ///
    /// * `image` - The photo as delivered by the external picker.
    /// * `frame` - The on-screen rectangle of the image view.
    /// * `settings` - Current detection and overlay settings.
    pub fn request_detection(
        &mut self,
        image: DynamicImage,
        frame: DisplayFrame,
        settings: &AppSettings,
    ) {
        self.scene.clear();
        self.report = None;

        self.job_counter += 1;
        let job_id = self.job_counter;
        self.current_job = Some(job_id);

        let detector = match (self.factory)() {
            Ok(detector) => detector,
            Err(err) => {
                self.current_job = None;
                self.report = Some(CycleReport::Failed {
                    message: format!("{err}"),
                });
                return;
            }
        };

        info!("Launching detection job {job_id}");
        let quality = settings.overlay.resize_quality;
        let job_tx = self.job_tx.clone();
        rayon::spawn(move || {
            let _guard = timing_guard("splitfit_core::detection_job", Level::Debug);
            // Scaling must finish before detection so the landmarks
            // come back in the displayed image's pixel space.
            let display_image = scale_for_display(&image, frame, quality);
            let result = detector.detect(&display_image).and_then(|poses| {
                if poses.is_empty() {
                    Err(DetectError::NoResults)
                } else {
                    Ok(poses)
                }
            });
            let payload = match result {
                Ok(poses) => JobMessage::DetectionFinished {
                    job_id,
                    data: DetectionJobOutput {
                        display_image,
                        poses,
                    },
                },
                Err(err) => JobMessage::DetectionFailed {
                    job_id,
                    error: err.to_string(),
                },
            };
            if job_tx.send(payload).is_err() {
                error!("session dropped detection result for job {job_id}");
            }
        });
    }

    /// Drain completed jobs and fold the latest one into the scene.
    ///
    /// Must be called from the interactive context; it is the only
    /// place the displayed image, overlay primitives, and report are
    /// mutated. Returns the new report when a cycle completed since
    /// the previous poll.
    pub fn poll(&mut self, frame: DisplayFrame, settings: &AppSettings) -> Option<&CycleReport> {
        let mut updated = false;
        while let Ok(message) = self.job_rx.try_recv() {
            updated |= self.apply_message(message, frame, settings);
        }
        if updated { self.report.as_ref() } else { None }
    }

    fn apply_message(
        &mut self,
        message: JobMessage,
        frame: DisplayFrame,
        settings: &AppSettings,
    ) -> bool {
        match message {
            JobMessage::DetectionFinished { job_id, data } => {
                if Some(job_id) != self.current_job {
                    info!("Ignoring stale detection result (job {job_id})");
                    return false;
                }
                self.current_job = None;

                let transform = build_view_transform(
                    (data.display_image.width(), data.display_image.height()),
                    frame,
                );
                let style = OverlayStyle::from(&settings.overlay);
                let threshold = settings.detection.score_threshold;
                self.scene
                    .replace(build_overlay(&data.poses, &transform, &style, threshold));

                let split_angle = data
                    .poses
                    .iter()
                    .find_map(|pose| split_angle(pose, threshold));
                self.report = Some(CycleReport::PosesDetected {
                    count: data.poses.len(),
                    split_angle,
                });
                self.display_image = Some(data.display_image);
                true
            }
            JobMessage::DetectionFailed { job_id, error } => {
                if Some(job_id) != self.current_job {
                    info!("Ignoring stale detection error: {error}");
                    return false;
                }
                self.current_job = None;
                self.report = Some(CycleReport::Failed { message: error });
                true
            }
        }
    }

    /// Forward a pinch-zoom update to the overlay, clamped to the
    /// configured zoom range.
    pub fn set_zoom(&mut self, zoom: f32, settings: &AppSettings) {
        self.scene.set_zoom(settings.zoom.clamp(zoom));
    }

    /// The annotations to paint over the displayed photo.
    pub fn scene(&self) -> &OverlayScene {
        &self.scene
    }

    /// The display-scaled photo from the most recent completed cycle.
    pub fn display_image(&self) -> Option<&DynamicImage> {
        self.display_image.as_ref()
    }

    /// Outcome of the most recent cycle, if any has completed.
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.report.as_ref()
    }

    /// Whether a detection job is still in flight.
    pub fn has_pending_job(&self) -> bool {
        self.current_job.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{Landmark, LandmarkKind, PoseDetector};
    use splitfit_utils::Point;
    use std::sync::Arc;

    struct NeverDetector;

    impl PoseDetector for NeverDetector {
        fn detect(&self, _image: &DynamicImage) -> Result<Vec<Pose>, DetectError> {
            Err(DetectError::NoResults)
        }
    }

    fn session() -> DetectionSession {
        DetectionSession::new(Arc::new(|| {
            Ok(Box::new(NeverDetector) as Box<dyn PoseDetector>)
        }))
    }

    fn pose_at(x: f32) -> Pose {
        Pose::new(vec![Landmark {
            kind: LandmarkKind::Nose,
            position: Point::new(x, 10.0),
            score: 0.9,
        }])
    }

    fn finished(job_id: u64, x: f32) -> JobMessage {
        JobMessage::DetectionFinished {
            job_id,
            data: DetectionJobOutput {
                display_image: DynamicImage::new_rgb8(200, 150),
                poses: vec![pose_at(x)],
            },
        }
    }

    #[test]
    fn stale_results_never_mutate_the_scene() {
        let mut session = session();
        let frame = DisplayFrame::sized(200.0, 150.0);
        let settings = AppSettings::default();

        session.current_job = Some(2);
        assert!(!session.apply_message(finished(1, 50.0), frame, &settings));
        assert!(session.scene().is_empty());
        assert!(session.last_report().is_none());

        assert!(session.apply_message(finished(2, 80.0), frame, &settings));
        assert!(!session.scene().is_empty());
        assert!(!session.has_pending_job());
    }

    #[test]
    fn stale_errors_are_ignored() {
        let mut session = session();
        let frame = DisplayFrame::sized(200.0, 150.0);
        let settings = AppSettings::default();

        session.current_job = Some(3);
        let stale = JobMessage::DetectionFailed {
            job_id: 1,
            error: "boom".into(),
        };
        assert!(!session.apply_message(stale, frame, &settings));
        assert!(session.has_pending_job());
    }

    #[test]
    fn failed_job_produces_a_failure_report() {
        let mut session = session();
        let frame = DisplayFrame::sized(200.0, 150.0);
        let settings = AppSettings::default();

        session.current_job = Some(1);
        let failure = JobMessage::DetectionFailed {
            job_id: 1,
            error: DetectError::NoResults.to_string(),
        };
        assert!(session.apply_message(failure, frame, &settings));
        let report = session.last_report().unwrap();
        assert!(matches!(report, CycleReport::Failed { .. }));
        assert!(report.message().contains("no results returned"));
    }

    #[test]
    fn factory_failure_reports_immediately() {
        let mut session = DetectionSession::new(Arc::new(|| {
            anyhow::bail!("model unavailable")
        }));
        let settings = AppSettings::default();
        session.request_detection(
            DynamicImage::new_rgb8(4, 4),
            DisplayFrame::sized(4.0, 4.0),
            &settings,
        );
        assert!(!session.has_pending_job());
        assert!(matches!(
            session.last_report(),
            Some(CycleReport::Failed { .. })
        ));
    }

    #[test]
    fn report_message_aggregates_pose_count_and_angle() {
        let detected = CycleReport::PosesDetected {
            count: 2,
            split_angle: Some(154.2),
        };
        assert_eq!(detected.message(), "2 poses detected; split angle 154\u{b0}");

        let single = CycleReport::PosesDetected {
            count: 1,
            split_angle: None,
        };
        assert_eq!(single.message(), "Split pose detected");
    }
}
