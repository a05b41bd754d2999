//! Nutrition Screenshot Tool
//!
//! Drag-select a region of the screen, OCR it with Tesseract and pull the
//! nutrition facts (calories, fat, carbohydrates, protein, sodium) out of the
//! recognized text.

// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod capture;
mod config;
mod error;
mod gui;
mod logger;
mod nutrition;
mod ocr;
mod paths;
mod pipeline;
mod selection;

use anyhow::{anyhow, Result};

use nutrition::NutritionExtractor;

fn main() -> Result<()> {
    logger::install_panic_hook();

    // Ensure output directories exist
    paths::ensure_directories()?;

    logger::init(log::LevelFilter::Info);

    // Load configuration
    let config = config::init_config();
    logger::set_level(config.log_level_filter());

    let extractor = NutritionExtractor::new(&config.extraction)?;

    // Warm up the OCR engine; a failure here is retried on the first capture
    if let Err(e) = ocr::shared_engine(&config.ocr) {
        log::warn!("Failed to set up Tesseract: {}", e);
        log::warn!("OCR will not work until Tesseract is installed.");
    }

    log::info!("Starting GUI application...");
    match gui::run_gui(config, extractor) {
        Ok(()) => {
            log::info!("GUI application exited normally");
            Ok(())
        }
        Err(e) => {
            log::error!("GUI error: {}", e);
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
