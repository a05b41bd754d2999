use anyhow::{anyhow, Result};
use image::DynamicImage;

use super::ScreenCapture;
use crate::selection::{CaptureRegion, SelectionRect};

/// A frozen picture of one display.
///
/// Regions are given in screen coordinates and mapped onto the image, which
/// may have a different pixel density than the screen (HiDPI displays).
#[derive(Clone)]
pub struct SnapshotCapture {
    image: DynamicImage,
    screen_bounds: SelectionRect,
}

impl SnapshotCapture {
    pub fn new(image: DynamicImage, screen_bounds: SelectionRect) -> Self {
        Self {
            image,
            screen_bounds,
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Area of the screen this snapshot shows, in screen coordinates.
    pub fn screen_bounds(&self) -> SelectionRect {
        self.screen_bounds
    }

    /// Maps a screen region to (x, y, width, height) in image pixels,
    /// clamped to the image.
    pub fn to_image_rect(&self, region: &CaptureRegion) -> (u32, u32, u32, u32) {
        let (w, h) = (self.image.width(), self.image.height());
        let bounds = &self.screen_bounds;
        let scale_x = w as f32 / bounds.width.max(1) as f32;
        let scale_y = h as f32 / bounds.height.max(1) as f32;

        let left = ((region.x - bounds.x).max(0) as f32 * scale_x) as u32;
        let top = ((region.y - bounds.y).max(0) as f32 * scale_y) as u32;
        let x0 = left.min(w);
        let y0 = top.min(h);
        let rw = ((region.width as f32 * scale_x).round() as u32).min(w - x0);
        let rh = ((region.height as f32 * scale_y).round() as u32).min(h - y0);

        (x0, y0, rw, rh)
    }
}

impl ScreenCapture for SnapshotCapture {
    fn capture(&self, region: &CaptureRegion) -> Result<DynamicImage> {
        let (x, y, width, height) = self.to_image_rect(region);
        if width == 0 || height == 0 {
            return Err(anyhow!(
                "Region {}x{} at ({}, {}) is outside the captured display",
                region.width,
                region.height,
                region.x,
                region.y
            ));
        }
        Ok(self.image.crop_imm(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_capture_crops_region() {
        let snapshot = SnapshotCapture::new(gradient(100, 200), SelectionRect::new(0, 0, 100, 200));
        let region = CaptureRegion::new(10, 50, 50, 20).unwrap();

        let cropped = snapshot.capture(&region).unwrap().to_rgba8();
        assert_eq!(cropped.dimensions(), (50, 20));
        assert_eq!(cropped.get_pixel(0, 0)[0], 10);
        assert_eq!(cropped.get_pixel(0, 0)[1], 50);
    }

    #[test]
    fn test_capture_with_screen_offset_and_hidpi() {
        // Display at x=1920 reported as 100x100, image is 2x density
        let snapshot =
            SnapshotCapture::new(gradient(200, 200), SelectionRect::new(1920, 0, 100, 100));
        let region = CaptureRegion::new(1930, 20, 30, 10).unwrap();

        assert_eq!(snapshot.to_image_rect(&region), (20, 40, 60, 20));
    }

    #[test]
    fn test_capture_clamps() {
        let snapshot = SnapshotCapture::new(gradient(100, 100), SelectionRect::new(0, 0, 100, 100));
        let region = CaptureRegion::new(90, 90, 50, 50).unwrap();

        let cropped = snapshot.capture(&region).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (10, 10));
    }

    #[test]
    fn test_capture_outside_display_fails() {
        let snapshot = SnapshotCapture::new(gradient(100, 100), SelectionRect::new(0, 0, 100, 100));
        let region = CaptureRegion::new(500, 500, 10, 10).unwrap();

        assert!(snapshot.capture(&region).is_err());
    }
}
