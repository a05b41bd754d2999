use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};

/// Largest width or height Tesseract accepts.
const MAX_DIMENSION: u32 = 32767;

/// Converts a capture to grayscale and upscales it if it is short.
///
/// Screen text is often 10-14px tall, below what Tesseract reads reliably.
/// Captures with height below `min_height` are scaled up by an integer factor
/// so that they reach at least `min_height`, as long as neither side grows
/// past `MAX_DIMENSION`. `min_height == 0` disables scaling.
pub fn prepare_for_ocr(img: &DynamicImage, min_height: u32) -> GrayImage {
    let gray = img.to_luma8();
    let (width, height) = gray.dimensions();

    let factor = upscale_factor(width, height, min_height);
    if factor <= 1 {
        return gray;
    }

    image::imageops::resize(
        &gray,
        width * factor,
        height * factor,
        FilterType::CatmullRom,
    )
}

/// Smallest integer factor that brings `height` up to `min_height`, capped so
/// the scaled image stays within `MAX_DIMENSION` on both sides.
fn upscale_factor(width: u32, height: u32, min_height: u32) -> u32 {
    if width == 0 || height == 0 || min_height == 0 || height >= min_height {
        return 1;
    }
    let wanted = min_height.div_ceil(height);
    let limit = MAX_DIMENSION / width.max(height);
    wanted.min(limit).max(1)
}
