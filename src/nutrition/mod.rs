//! Nutrition label extraction from OCR text.
//!
//! This module provides:
//! - The field and result types (`NutritionField`, `NutritionData`)
//! - Pattern-based extraction (`NutritionExtractor`)
//! - Plain-text rendering of results (`render_report`)

pub mod extract;
pub mod report;

pub use extract::NutritionExtractor;
pub use report::{missing_fields_warning, render_report};

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ExtractionConfig;

/// A quantity read from a nutrition label.
///
/// Declaration order is the order fields are searched and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NutritionField {
    Energy,
    Fat,
    Carbohydrates,
    Protein,
    Sodium,
}

impl NutritionField {
    pub const ALL: [NutritionField; 5] = [
        Self::Energy,
        Self::Fat,
        Self::Carbohydrates,
        Self::Protein,
        Self::Sodium,
    ];

    /// Result key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Energy => "calories/energy",
            Self::Fat => "fat",
            Self::Carbohydrates => "carbohydrates",
            Self::Protein => "protein",
            Self::Sodium => "sodium",
        }
    }

    /// Key with its first letter capitalized, e.g. "Calories/energy".
    pub fn display_name(&self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Unit attached to a number found by the loose fallback search.
    pub fn default_unit(&self) -> &'static str {
        match self {
            Self::Energy => "kcal",
            Self::Fat | Self::Carbohydrates | Self::Protein => "g",
            Self::Sodium => "mg",
        }
    }

    /// Formats a bare number with this field's unit: "250 kcal", "12g", "450mg".
    pub fn format_value(&self, number: &str, unit: &str) -> String {
        match self {
            Self::Energy => format!("{} {}", number, unit),
            _ => format!("{}{}", number, unit),
        }
    }
}

impl fmt::Display for NutritionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields searched for under the given configuration, in search order.
pub fn configured_fields(config: &ExtractionConfig) -> Vec<NutritionField> {
    NutritionField::ALL
        .into_iter()
        .filter(|field| *field != NutritionField::Sodium || config.include_sodium)
        .collect()
}

/// Extracted values keyed by field. A missing key means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutritionData {
    values: BTreeMap<NutritionField, String>,
}

impl NutritionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: NutritionField, value: String) {
        self.values.insert(field, value);
    }

    pub fn get(&self, field: NutritionField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates in the fixed field order.
    pub fn iter(&self) -> impl Iterator<Item = (NutritionField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl fmt::Display for NutritionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(NutritionField::Energy.display_name(), "Calories/energy");
        assert_eq!(NutritionField::Carbohydrates.display_name(), "Carbohydrates");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(NutritionField::Energy.format_value("250", "kcal"), "250 kcal");
        assert_eq!(NutritionField::Fat.format_value("12.5", "g"), "12.5g");
        assert_eq!(NutritionField::Sodium.format_value("450", "mg"), "450mg");
    }

    #[test]
    fn test_configured_fields() {
        let mut config = ExtractionConfig::default();
        config.include_sodium = false;
        assert_eq!(
            configured_fields(&config),
            vec![
                NutritionField::Energy,
                NutritionField::Fat,
                NutritionField::Carbohydrates,
                NutritionField::Protein,
            ]
        );

        config.include_sodium = true;
        assert_eq!(configured_fields(&config).len(), 5);
    }

    #[test]
    fn test_data_iterates_in_field_order() {
        let mut data = NutritionData::new();
        data.insert(NutritionField::Protein, "9g".to_string());
        data.insert(NutritionField::Energy, "250 kcal".to_string());
        data.insert(NutritionField::Fat, "12g".to_string());

        let fields: Vec<NutritionField> = data.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![NutritionField::Energy, NutritionField::Fat, NutritionField::Protein]
        );
        assert_eq!(
            data.to_string(),
            "{calories/energy: 250 kcal, fat: 12g, protein: 9g}"
        );
    }
}
