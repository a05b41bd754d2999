//! Screen capture.
//!
//! This module provides:
//! - The capture capability (`ScreenCapture`)
//! - Display snapshots (`DisplayCapture`)
//! - Capture from a frozen display image (`SnapshotCapture`)
//! - Saving the captured image (`save_screenshot`)

pub mod display;
pub mod snapshot;

pub use display::DisplayCapture;
pub use snapshot::SnapshotCapture;

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::paths::SCREENSHOT_FILE_NAME;
use crate::selection::CaptureRegion;

/// Produces an image of a screen rectangle.
pub trait ScreenCapture {
    fn capture(&self, region: &CaptureRegion) -> Result<DynamicImage>;
}

/// Saves a capture as `screenshot.png` in `dir`, replacing the previous one.
pub fn save_screenshot(image: &DynamicImage, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(SCREENSHOT_FILE_NAME);
    image
        .save(&path)
        .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;
    log::info!("Saved capture to {}", path.display());
    Ok(path)
}
