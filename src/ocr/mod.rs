pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::TesseractEngine;

use image::DynamicImage;
use std::sync::OnceLock;

use crate::config::OcrConfig;
use crate::error::ExtractionError;

/// Anything that can turn an image into text fragments.
///
/// Fragments come back in the engine's order (roughly left-to-right,
/// top-to-bottom). Positions are not part of the contract.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>, ExtractionError>;
}

/// Process-wide engine, created on first successful use.
static ENGINE: OnceLock<TesseractEngine> = OnceLock::new();

/// Returns the shared Tesseract engine, initializing it on first call.
///
/// A failed initialization is not cached, so a later call (for example after
/// the user installs Tesseract) tries again.
pub fn shared_engine(config: &OcrConfig) -> Result<&'static TesseractEngine, ExtractionError> {
    get_or_try_init(&ENGINE, || {
        log::info!("Initializing OCR engine (language: {})", config.language);
        TesseractEngine::new(config)
    })
}

/// Returns the cell's value, running `init` only while the cell is empty.
/// An `Err` from `init` leaves the cell empty.
fn get_or_try_init<T, E>(
    cell: &OnceLock<T>,
    init: impl FnOnce() -> Result<T, E>,
) -> Result<&T, E> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_init_runs_once() {
        let cell: OnceLock<u32> = OnceLock::new();
        let calls = Cell::new(0);
        let init = || -> Result<u32, ExtractionError> {
            calls.set(calls.get() + 1);
            Ok(42)
        };

        assert_eq!(*get_or_try_init(&cell, init).unwrap(), 42);
        assert_eq!(*get_or_try_init(&cell, init).unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_init_is_retried() {
        let cell: OnceLock<u32> = OnceLock::new();

        let first = get_or_try_init(&cell, || {
            Err(ExtractionError::EngineUnavailable("tesseract not found".to_string()))
        });
        assert!(matches!(first, Err(ExtractionError::EngineUnavailable(_))));
        assert!(cell.get().is_none());

        let second = get_or_try_init(&cell, || Ok::<_, ExtractionError>(7));
        assert_eq!(*second.unwrap(), 7);

        let third = get_or_try_init(&cell, || {
            Err(ExtractionError::EngineFailed("not called".to_string()))
        });
        assert_eq!(*third.unwrap(), 7);
    }
}
