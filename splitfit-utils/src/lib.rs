//! Common helpers shared across splitfit crates.

/// Basic color type shared between configuration and overlay output.
pub mod color;
/// Application configuration and settings management.
pub mod config;
/// Image loading and aspect-fit resizing.
pub mod image_utils;
/// 2D point arithmetic used by the geometry pipeline.
pub mod point;
/// Instrumentation helpers for optional performance tracing.
pub mod telemetry;

use anyhow::Result;
use log::LevelFilter;

pub use color::RgbaColor;
pub use config::{
    AppSettings, DetectionSettings, OverlaySettings, ResizeQuality, ZoomSettings,
    default_settings_path,
};
pub use image_utils::{aspect_fit_size, load_image, scale_to_fit};
pub use point::Point;
pub use telemetry::{
    TimingGuard, configure as configure_telemetry, telemetry_allows, telemetry_enabled,
    timing_guard, timing_guard_if,
};

/// Initialize logging once for any host embedding the pipeline.
///
/// This function respects the `RUST_LOG` environment variable if it is set.
/// Otherwise, it falls back to the provided default filter level.
///
/// # Arguments
///
/// * `default_filter` - The `LevelFilter` to use if `RUST_LOG` is not set.
pub fn init_logging(default_filter: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    builder.filter_module("splitfit::telemetry", LevelFilter::Trace);

    if builder.try_init().is_err() {
        // Logger already initialized; nothing to do.
    }
    Ok(())
}
