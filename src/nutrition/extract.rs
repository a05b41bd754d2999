use image::DynamicImage;
use regex::{Captures, Regex, RegexBuilder};

use super::{configured_fields, NutritionData, NutritionField};
use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::ocr::TextRecognizer;

/// Decimal number: 12 or 12.5
const DECIMAL: &str = r"\d+(?:\.\d+)?";

/// Strict and loose patterns for one field.
struct FieldPattern {
    field: NutritionField,
    strict: Regex,
    fallback: Option<Regex>,
}

/// Pulls nutrition values out of recognized label text.
///
/// Holds only compiled patterns, so `extract` has no side effects beyond
/// logging and gives the same answer every time for the same text.
pub struct NutritionExtractor {
    patterns: Vec<FieldPattern>,
    decimal_calories: bool,
}

/// Strict pattern source for a field.
///
/// Energy accepts, in order of preference:
/// - a kJ value followed by a kcal value ("250 kJ / 60 kcal"), reported as kcal
/// - a lone kJ value ("1046 kJ")
/// - a number with optional kcal and optional trailing kJ ("250 kcal / 1046 kJ")
///
/// Energy numbers are matched in full, decimals included. Whole-number mode
/// truncates them after the unit is known.
fn strict_pattern(field: NutritionField) -> String {
    match field {
        NutritionField::Energy => format!(
            r"(?:calories|energy)[:\s]+(?:(?P<pair_kj>{n})\s*kJ[,\s/]*(?P<pair_kcal>{n})\s*kcal|(?P<kj>{n})\s*kJ\b|(?P<kcal>{n})(?:\s*kcal)?(?:[,\s/]*{n}\s*kJ)?)",
            n = DECIMAL
        ),
        NutritionField::Fat => format!(r"(?:total\s+)?fat[:\s]+(?P<value>{})\s*g", DECIMAL),
        NutritionField::Carbohydrates => format!(
            r"(?:total\s+)?carbohydrates?[:\s]+(?P<value>{})\s*g",
            DECIMAL
        ),
        NutritionField::Protein => format!(r"protein[:\s]+(?P<value>{})\s*g", DECIMAL),
        NutritionField::Sodium => {
            format!(r"(?:sodium|salt)[:\s]+(?P<value>{})\s*mg", DECIMAL)
        }
    }
}

/// Keyword alternatives used by the loose fallback search.
fn fallback_keywords(field: NutritionField) -> &'static str {
    match field {
        NutritionField::Energy => "calories|energy",
        NutritionField::Fat => "fat",
        NutritionField::Carbohydrates => "carbohydrates?",
        NutritionField::Protein => "protein",
        NutritionField::Sodium => "sodium|salt",
    }
}

/// Loose pattern: keyword, then the first number anywhere after it.
fn fallback_pattern(field: NutritionField) -> String {
    format!(
        r"(?:{}).*?(?P<value>{})",
        fallback_keywords(field),
        DECIMAL
    )
}

fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, ExtractionError> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()?)
}

/// Number and unit of a strict energy match, preferring kcal over kJ.
fn energy_value<'t>(caps: &Captures<'t>) -> Option<(&'t str, &'static str)> {
    let kcal = caps.name("pair_kcal").or_else(|| caps.name("kcal"));
    let kj = caps.name("pair_kj").or_else(|| caps.name("kj"));

    match (kcal, kj) {
        (Some(kcal), _) => Some((kcal.as_str(), "kcal")),
        (None, Some(kj)) => Some((kj.as_str(), "kJ")),
        (None, None) => None,
    }
}

/// Integer part of a decimal number: "250.5" -> "250".
fn whole_part(number: &str) -> &str {
    number.split('.').next().unwrap_or(number)
}

/// Joins OCR fragments into one string with single spaces, dropping blanks.
pub fn join_fragments(fragments: &[String]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl NutritionExtractor {
    /// Compiles the patterns for every configured field.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let patterns = configured_fields(config)
            .into_iter()
            .map(|field| -> Result<FieldPattern, ExtractionError> {
                let strict = build_regex(&strict_pattern(field), config.case_insensitive)?;
                let fallback = if config.enable_fallback_search {
                    Some(build_regex(
                        &fallback_pattern(field),
                        config.case_insensitive,
                    )?)
                } else {
                    None
                };
                Ok(FieldPattern {
                    field,
                    strict,
                    fallback,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            decimal_calories: config.allow_decimal_calories,
        })
    }

    /// Formats a matched number, dropping the fraction of calorie values
    /// when decimals are not allowed.
    fn format_number(&self, field: NutritionField, number: &str, unit: &str) -> String {
        let number = if field == NutritionField::Energy && !self.decimal_calories {
            whole_part(number)
        } else {
            number
        };
        field.format_value(number, unit)
    }

    /// Extracts every field that can be found in `text`.
    pub fn extract(&self, text: &str) -> NutritionData {
        let mut data = NutritionData::new();

        for pattern in &self.patterns {
            let field = pattern.field;

            let strict_value = pattern.strict.captures(text).and_then(|caps| {
                let value = match field {
                    NutritionField::Energy => energy_value(&caps),
                    _ => caps
                        .name("value")
                        .map(|m| (m.as_str(), field.default_unit())),
                };
                if value.is_some() {
                    log::info!("Matched {}: {}", field, &caps[0]);
                }
                value.map(|(number, unit)| self.format_number(field, number, unit))
            });

            if let Some(value) = strict_value {
                data.insert(field, value);
                continue;
            }

            log::info!("No match found for {}", field);

            let Some(fallback) = &pattern.fallback else {
                continue;
            };
            if let Some(caps) = fallback.captures(text) {
                if let Some(number) = caps.name("value") {
                    log::info!("Found nearby number for {}: {}", field, &caps[0]);
                    data.insert(
                        field,
                        self.format_number(field, number.as_str(), field.default_unit()),
                    );
                }
            }
        }

        log::info!("Extracted {} nutrition fields: {}", data.len(), data);
        data
    }

    /// Runs OCR on the image and extracts fields from the joined text.
    pub fn extract_from_image(
        &self,
        recognizer: &dyn TextRecognizer,
        image: &DynamicImage,
    ) -> Result<NutritionData, ExtractionError> {
        let fragments = recognizer.recognize(image)?;
        let text = join_fragments(&fragments);
        log::info!("Extracted text: {}", text);
        Ok(self.extract(&text))
    }
}
