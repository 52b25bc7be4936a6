//! Shared configuration types consumed across the splitfit workspace.
//!
//! These structures provide a common representation for detection,
//! overlay, and zoom settings that can be serialized to disk and
//! reused by any host screen embedding the pipeline.

use crate::color::RgbaColor;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::Path, path::PathBuf, str::FromStr};

/// Detection parameters applied to pose results before rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionSettings {
    /// Minimum confidence score for a landmark to be rendered. A
    /// landmark below this threshold is dropped along with every
    /// skeletal connection touching it.
    pub score_threshold: f32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            score_threshold: 0.75,
        }
    }
}

impl DetectionSettings {
    /// Clamp values to sensible ranges.
    pub fn sanitize(&mut self) {
        self.score_threshold = self.score_threshold.clamp(0.0, 1.0);
    }
}

/// Trade-off between resize fidelity and throughput for the display
/// scaling step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizeQuality {
    /// Preserve visual quality when resizing (default, Triangle filter).
    #[default]
    Quality,
    /// Prioritize responsiveness for large photos (Nearest filter).
    Speed,
}

impl ResizeQuality {
    pub fn as_label(self) -> &'static str {
        match self {
            ResizeQuality::Quality => "Quality",
            ResizeQuality::Speed => "Speed",
        }
    }

    /// Sampling filter used by the `image` crate for this quality level.
    pub fn filter(self) -> FilterType {
        match self {
            ResizeQuality::Quality => FilterType::Triangle,
            ResizeQuality::Speed => FilterType::Nearest,
        }
    }
}

impl fmt::Display for ResizeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResizeQuality::Quality => "quality",
                ResizeQuality::Speed => "speed",
            }
        )
    }
}

impl FromStr for ResizeQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quality" => Ok(ResizeQuality::Quality),
            "speed" => Ok(ResizeQuality::Speed),
            other => Err(format!(
                "invalid resize quality '{other}'; expected 'quality' or 'speed'"
            )),
        }
    }
}

/// Visual parameters for annotation primitives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlaySettings {
    /// Radius of landmark dot markers, in view points.
    pub dot_radius: f32,
    /// Stroke width of skeletal connection lines, in view points.
    pub line_width: f32,
    /// Fill color for landmark dots.
    pub dot_color: RgbaColor,
    /// Stroke color for connection lines.
    pub line_color: RgbaColor,
    /// Quality level applied when scaling photos for display.
    pub resize_quality: ResizeQuality,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            dot_radius: 5.0,
            line_width: 0.5,
            dot_color: RgbaColor::opaque(82, 180, 255),
            line_color: RgbaColor::opaque(255, 255, 0),
            resize_quality: ResizeQuality::default(),
        }
    }
}

impl OverlaySettings {
    pub fn sanitize(&mut self) {
        self.dot_radius = self.dot_radius.clamp(0.5, 32.0);
        self.line_width = self.line_width.clamp(0.1, 16.0);
    }
}

/// Interactive zoom limits for the host image view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomSettings {
    /// Smallest permitted zoom factor.
    pub min_zoom: f32,
    /// Largest permitted zoom factor.
    pub max_zoom: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 6.0,
        }
    }
}

impl ZoomSettings {
    pub fn sanitize(&mut self) {
        self.min_zoom = self.min_zoom.max(0.1);
        if self.max_zoom < self.min_zoom {
            self.max_zoom = self.min_zoom;
        }
    }

    /// Restrict a gesture-supplied zoom factor to the configured range.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Top-level application settings persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppSettings {
    pub detection: DetectionSettings,
    pub overlay: OverlaySettings,
    pub zoom: ZoomSettings,
}

impl AppSettings {
    /// Load settings from a JSON file, applying sanitization.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the settings file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let mut settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings JSON at {}", path.display()))?;
        settings.sanitize();
        Ok(settings)
    }

    /// Serialize settings to disk in pretty-printed JSON.
    ///
    /// This will overwrite the file if it already exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize settings JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        Ok(())
    }

    pub fn sanitize(&mut self) {
        self.detection.sanitize();
        self.overlay.sanitize();
        self.zoom.sanitize();
    }
}

/// Returns the default path for persisted settings (`config/splitfit_settings.json`).
pub fn default_settings_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join("config/splitfit_settings.json"))
        .unwrap_or_else(|_| PathBuf::from("config/splitfit_settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_screen_constants() {
        let settings = AppSettings::default();
        assert_eq!(settings.detection.score_threshold, 0.75);
        assert_eq!(settings.overlay.dot_radius, 5.0);
        assert_eq!(settings.overlay.line_width, 0.5);
        assert_eq!(settings.zoom.min_zoom, 1.0);
        assert_eq!(settings.zoom.max_zoom, 6.0);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut settings = AppSettings::default();
        settings.detection.score_threshold = 4.0;
        settings.overlay.line_width = 0.0;
        settings.zoom.min_zoom = 2.0;
        settings.zoom.max_zoom = 1.0;
        settings.sanitize();
        assert_eq!(settings.detection.score_threshold, 1.0);
        assert!(settings.overlay.line_width >= 0.1);
        assert_eq!(settings.zoom.max_zoom, settings.zoom.min_zoom);
    }

    #[test]
    fn zoom_clamp_respects_limits() {
        let zoom = ZoomSettings::default();
        assert_eq!(zoom.clamp(0.5), 1.0);
        assert_eq!(zoom.clamp(3.0), 3.0);
        assert_eq!(zoom.clamp(9.0), 6.0);
    }

    #[test]
    fn resize_quality_parses_case_insensitively() {
        assert_eq!(
            "Quality".parse::<ResizeQuality>().unwrap(),
            ResizeQuality::Quality
        );
        assert_eq!(
            " speed ".parse::<ResizeQuality>().unwrap(),
            ResizeQuality::Speed
        );
        assert!("fast".parse::<ResizeQuality>().is_err());
    }
}
