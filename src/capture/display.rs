//! Display snapshots via the `screenshots` crate.

use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, RgbaImage};
use screenshots::Screen;

use super::snapshot::SnapshotCapture;
use crate::selection::SelectionRect;

/// Freezes a physical display into a `SnapshotCapture`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayCapture;

/// Rebuilds a capture buffer as an `image` crate image.
fn to_dynamic_image(width: u32, height: u32, bytes: Vec<u8>) -> Result<DynamicImage> {
    let image = RgbaImage::from_raw(width, height, bytes).context("screenshot failed")?;
    Ok(DynamicImage::ImageRgba8(image))
}

impl DisplayCapture {
    /// Freezes the whole primary display (or the first one found).
    pub fn snapshot_primary(&self) -> Result<SnapshotCapture> {
        let screens = Screen::all()?;
        let screen = screens
            .iter()
            .find(|s| s.display_info.is_primary)
            .or_else(|| screens.first())
            .ok_or_else(|| anyhow!("No display found"))?;

        let info = &screen.display_info;
        log::info!(
            "Snapshot of display {} at ({}, {}) {}x{}",
            info.id,
            info.x,
            info.y,
            info.width,
            info.height
        );

        let image = screen.capture()?;
        let image = to_dynamic_image(image.width(), image.height(), image.to_vec())?;

        Ok(SnapshotCapture::new(
            image,
            SelectionRect::new(info.x, info.y, info.width as i32, info.height as i32),
        ))
    }
}
