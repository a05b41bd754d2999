//! One capture request: selection -> image -> OCR -> nutrition data.

use std::path::{Path, PathBuf};

use crate::capture::{save_screenshot, ScreenCapture};
use crate::error::CaptureError;
use crate::nutrition::{NutritionData, NutritionExtractor};
use crate::ocr::TextRecognizer;
use crate::selection::{CaptureRegion, SelectionRect};

/// Everything a successful capture produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    pub region: CaptureRegion,
    /// Where the capture was written, if saving succeeded.
    pub saved_to: Option<PathBuf>,
    /// Possibly empty; an empty result is not a failure.
    pub data: NutritionData,
}

impl CaptureResult {
    /// "Captured: x, y, WxH" line for the result box.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Captured: {}, {}, {}x{}",
            self.region.x, self.region.y, self.region.width, self.region.height
        );
        if let Some(path) = &self.saved_to {
            summary.push_str(&format!("\nSaved as '{}'", path.display()));
        }
        summary
    }
}

/// Runs one capture.
///
/// An empty or missing selection fails with `EmptySelection` before the
/// capture backend is touched. Failing to save the screenshot file is logged
/// and does not stop extraction.
pub fn process_capture(
    selection: Option<SelectionRect>,
    capture: &dyn ScreenCapture,
    recognizer: &dyn TextRecognizer,
    extractor: &NutritionExtractor,
    screenshots_dir: &Path,
) -> Result<CaptureResult, CaptureError> {
    let region = match selection {
        Some(rect) => CaptureRegion::try_from(rect)?,
        None => return Err(CaptureError::EmptySelection),
    };

    log::info!(
        "Capturing {}x{} at ({}, {})",
        region.width,
        region.height,
        region.x,
        region.y
    );
    let image = capture.capture(&region).map_err(CaptureError::Capture)?;

    let saved_to = match save_screenshot(&image, screenshots_dir) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("Could not save screenshot: {:#}", e);
            None
        }
    };

    let data = extractor.extract_from_image(recognizer, &image)?;

    Ok(CaptureResult {
        region,
        saved_to,
        data,
    })
}
