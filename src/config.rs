//! Configuration types.
//!
//! Loads settings from config.json at startup. Every field has a default, so a
//! missing or partial file still yields a usable configuration.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Switches for the nutrition field extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Match keywords and units regardless of case.
    pub case_insensitive: bool,
    /// Accept values like "250.5" for calories/energy.
    pub allow_decimal_calories: bool,
    /// Retry a missed field with a loose "keyword ... first number" search.
    pub enable_fallback_search: bool,
    /// Also look for sodium / salt in milligrams.
    pub include_sodium: bool,
    /// Show a warning line listing fields that were not found.
    pub warn_on_missing_fields: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            allow_decimal_calories: true,
            enable_fallback_search: true,
            include_sodium: false,
            warn_on_missing_fields: false,
        }
    }
}

/// Tesseract invocation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code (traineddata file name without extension)
    pub language: String,
    /// Tesseract --psm value. 6 = assume a single uniform block of text.
    pub page_segmentation_mode: u8,
    /// Captures shorter than this (in pixels) are upscaled before OCR.
    pub upscale_min_height: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: 6,
            upscale_min_height: 300,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// One of "error", "warn", "info", "debug", "trace". Unset = build default.
    pub log_level: Option<String>,
    pub extraction: ExtractionConfig,
    pub ocr: OcrConfig,
}

impl AppConfig {
    /// Parses configuration from JSON text.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Log level from the config, falling back to debug/info by build type.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            })
    }
}

/// Loads configuration from the given path or returns defaults.
pub fn load_config_from(config_path: &Path) -> AppConfig {
    log::info!("Looking for config at: {}", config_path.display());

    if !config_path.exists() {
        log::info!("No config.json found, using defaults");
        return AppConfig::default();
    }

    match fs::read_to_string(config_path) {
        Ok(contents) => match AppConfig::from_json(&contents) {
            Ok(config) => {
                log::info!("Config loaded from config.json");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config.json: {}. Using defaults.", e);
                AppConfig::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read config.json: {}. Using defaults.", e);
            AppConfig::default()
        }
    }
}

/// Loads config.json from the executable directory into the global instance.
/// Later calls are no-ops and return the already loaded configuration.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| load_config_from(&crate::paths::get_config_path()))
}
