use super::{configured_fields, NutritionData, NutritionField};
use crate::config::ExtractionConfig;

const REPORT_HEADER: &str = "Extracted Nutrition Information:";
const NO_DATA_MESSAGE: &str =
    "No nutrition information extracted. Please try again with a clearer image.";

/// Renders extracted data as plain text, one `Field: value` line per match.
pub fn render_report(data: &NutritionData) -> String {
    let mut output = format!("{}\n", REPORT_HEADER);

    if data.is_empty() {
        output.push_str(NO_DATA_MESSAGE);
        return output;
    }

    for (field, value) in data.iter() {
        output.push_str(&format!("{}: {}\n", field.display_name(), value));
    }
    output
}

/// Configured fields that the extraction did not find.
pub fn missing_fields(data: &NutritionData, config: &ExtractionConfig) -> Vec<NutritionField> {
    configured_fields(config)
        .into_iter()
        .filter(|field| data.get(*field).is_none())
        .collect()
}

/// Warning line for a partial result, if the config asks for one.
///
/// Returns `None` for complete or empty results; an empty result already
/// gets its own message from `render_report`.
pub fn missing_fields_warning(data: &NutritionData, config: &ExtractionConfig) -> Option<String> {
    if !config.warn_on_missing_fields || data.is_empty() {
        return None;
    }
    let missing = missing_fields(data, config);
    if missing.is_empty() {
        return None;
    }
    let names: Vec<&str> = missing.iter().map(|field| field.key()).collect();
    Some(format!("Warning: not found: {}", names.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NutritionData {
        let mut data = NutritionData::new();
        data.insert(NutritionField::Fat, "12g".to_string());
        data.insert(NutritionField::Energy, "250 kcal".to_string());
        data
    }

    #[test]
    fn test_render_report() {
        assert_eq!(
            render_report(&sample()),
            "Extracted Nutrition Information:\nCalories/energy: 250 kcal\nFat: 12g\n"
        );
    }

    #[test]
    fn test_render_report_empty() {
        assert_eq!(
            render_report(&NutritionData::new()),
            "Extracted Nutrition Information:\n\
             No nutrition information extracted. Please try again with a clearer image."
        );
    }

    #[test]
    fn test_missing_fields() {
        let config = ExtractionConfig::default();
        assert_eq!(
            missing_fields(&sample(), &config),
            vec![NutritionField::Carbohydrates, NutritionField::Protein]
        );

        let config = ExtractionConfig {
            include_sodium: true,
            ..Default::default()
        };
        assert_eq!(missing_fields(&sample(), &config).len(), 3);
    }

    #[test]
    fn test_missing_fields_warning() {
        let config = ExtractionConfig::default();
        assert_eq!(missing_fields_warning(&sample(), &config), None);

        let config = ExtractionConfig {
            warn_on_missing_fields: true,
            ..Default::default()
        };
        assert_eq!(
            missing_fields_warning(&sample(), &config),
            Some("Warning: not found: carbohydrates, protein".to_string())
        );
        assert_eq!(missing_fields_warning(&NutritionData::new(), &config), None);
    }
}
