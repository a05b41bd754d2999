use image::DynamicImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::prepare_for_ocr;
use super::setup::{ensure_tesseract, TesseractPaths};
use super::TextRecognizer;
use crate::config::OcrConfig;
use crate::error::ExtractionError;

/// Represents a line of OCR text with confidence score
#[derive(Debug, Clone, PartialEq)]
pub struct OcrLine {
    pub text: String,
    pub words: Vec<OcrWord>,
    pub confidence: f32,
}

/// Represents a single word from OCR with confidence score
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    pub text: String,
    pub confidence: f32,
}

/// Tesseract command-line backend.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    paths: TesseractPaths,
    language: String,
    page_segmentation_mode: u8,
    upscale_min_height: u32,
}

impl TesseractEngine {
    /// Locates the executable and language data, downloading the data if needed.
    pub fn new(config: &OcrConfig) -> Result<Self, ExtractionError> {
        let paths = ensure_tesseract(&config.language)
            .map_err(|e| ExtractionError::EngineUnavailable(e.to_string()))?;

        Ok(Self {
            paths,
            language: config.language.clone(),
            page_segmentation_mode: config.page_segmentation_mode,
            upscale_min_height: config.upscale_min_height,
        })
    }

    /// Runs Tesseract and returns structured lines with confidence scores.
    pub fn recognize_lines(&self, img: &DynamicImage) -> Result<Vec<OcrLine>, ExtractionError> {
        let prepared = prepare_for_ocr(img, self.upscale_min_height);

        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        prepared.save(temp_input.path())?;

        // Tesseract appends .tsv to the output base name
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let output = Command::new(&self.paths.executable)
            .arg(temp_input.path())
            .arg(&output_base)
            .arg("--tessdata-dir")
            .arg(&self.paths.tessdata)
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.page_segmentation_mode.to_string())
            .arg("tsv")
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::EngineFailed(stderr.trim().to_string()));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path).map_err(|e| {
            ExtractionError::EngineFailed(format!("Failed to read Tesseract output: {}", e))
        })?;
        let _ = std::fs::remove_file(&tsv_path);

        Ok(parse_tsv_output(&tsv_content))
    }
}

impl TextRecognizer for TesseractEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>, ExtractionError> {
        let lines = self.recognize_lines(image)?;
        for line in &lines {
            log::debug!(
                "OCR line ({:.0}%, {} words): {}",
                line.confidence,
                line.words.len(),
                line.text
            );
        }
        Ok(lines.into_iter().map(|line| line.text).collect())
    }
}

/// Collects the words of one line into an OcrLine with average confidence.
fn finish_line(words: Vec<OcrWord>) -> Option<OcrLine> {
    if words.is_empty() {
        return None;
    }
    let confidence = words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;
    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Some(OcrLine {
        text,
        words,
        confidence,
    })
}

/// Parses Tesseract TSV output into lines, in the order Tesseract emits them.
///
/// TSV fields: level, page_num, block_num, par_num, line_num, word_num,
///             left, top, width, height, conf, text
pub fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut lines = Vec::new();
    let mut current_key: Option<(i32, i32, i32, i32)> = None;
    let mut current_words: Vec<OcrWord> = Vec::new();

    for row in tsv.lines().skip(1) {
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // Level 5 = word
        let level: i32 = fields[0].parse().unwrap_or(-1);
        if level != 5 {
            continue;
        }

        let text = fields[11].trim();
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        if text.is_empty() || conf < 0.0 {
            continue;
        }

        // Line numbers restart in every block and paragraph
        let key = (
            fields[1].parse().unwrap_or(-1),
            fields[2].parse().unwrap_or(-1),
            fields[3].parse().unwrap_or(-1),
            fields[4].parse().unwrap_or(-1),
        );
        if current_key != Some(key) {
            lines.extend(finish_line(std::mem::take(&mut current_words)));
            current_key = Some(key);
        }

        current_words.push(OcrWord {
            text: text.to_string(),
            confidence: conf,
        });
    }

    lines.extend(finish_line(current_words));
    lines
}
