//! Result formatting
//!
//! Stable user-facing strings: the fixed fertilizer product table, crop
//! label casing, two-decimal yield display, and the error texts pages and
//! the JSON API hand back. Wording here is part of the contract; tests pin
//! it.

use crate::artifact::ClassOutput;
use crate::error::PredictError;

/// Fertilizer products by model class index (position = index). The model
/// bundle ships without a target decoder, so the mapping is fixed here.
pub static FERTILIZER_PRODUCTS: &[&str] = &[
    "10-26-26", "14-35-14", "17-17-17", "20-20", "28-28", "DAP", "Urea",
];

/// Map a classifier output to a product name. An index outside the table
/// degrades to `Fertilizer #<index>`, never a panic; an already-decoded
/// label passes through unchanged.
pub fn fertilizer_label(output: &ClassOutput) -> String {
    match output {
        ClassOutput::Label(label) => label.clone(),
        ClassOutput::Index(index) => usize::try_from(*index)
            .ok()
            .and_then(|i| FERTILIZER_PRODUCTS.get(i))
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("Fertilizer #{}", index)),
    }
}

/// Uppercase the first letter, leave the rest as trained.
pub fn capitalize_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-decimal display for yield values ("5.10", "3.50").
pub fn yield_text(value: f64) -> String {
    format!("{:.2}", value)
}

/// What a page renders after a prediction request: a result or an error
/// string, plus the flag templates use to style it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedResult {
    pub text: String,
    pub is_error: bool,
}

impl FormattedResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// User-facing text for each failure kind.
pub fn error_text(err: &PredictError) -> String {
    match err {
        PredictError::Validation(inner) => format!("Invalid input: {}.", inner),
        PredictError::Encoding(_) => "Unknown crop or soil type.".to_string(),
        PredictError::ModelUnavailable { domain } => {
            format!("The {} model is currently unavailable.", domain)
        }
        PredictError::Inference { .. } => "Prediction failed. Please try again.".to_string(),
    }
}

/// Fold a predictor outcome into what a page renders.
pub fn page_result<T>(
    outcome: Result<T, PredictError>,
    render: impl FnOnce(T) -> String,
) -> FormattedResult {
    match outcome {
        Ok(value) => FormattedResult::ok(render(value)),
        Err(err) => FormattedResult::error(error_text(&err)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EncodingError, ValidationError};
    use crate::registry::Domain;

    #[test]
    fn test_fertilizer_product_table() {
        assert_eq!(FERTILIZER_PRODUCTS.len(), 7);
        assert_eq!(fertilizer_label(&ClassOutput::Index(0)), "10-26-26");
        assert_eq!(fertilizer_label(&ClassOutput::Index(5)), "DAP");
        assert_eq!(fertilizer_label(&ClassOutput::Index(6)), "Urea");
    }

    #[test]
    fn test_unknown_index_degrades_to_numbered_label() {
        assert_eq!(fertilizer_label(&ClassOutput::Index(99)), "Fertilizer #99");
        assert_eq!(fertilizer_label(&ClassOutput::Index(-3)), "Fertilizer #-3");
    }

    #[test]
    fn test_decoded_label_passes_through() {
        let output = ClassOutput::Label("Super Phosphate".to_string());
        assert_eq!(fertilizer_label(&output), "Super Phosphate");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("rice"), "Rice");
        assert_eq!(capitalize_first("Rice"), "Rice");
        assert_eq!(capitalize_first("kidneybeans"), "Kidneybeans");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.866), 4.87);
        assert_eq!(round2(3.5), 3.5);
        assert_eq!(round2(5.1000000001), 5.1);
    }

    #[test]
    fn test_yield_text_always_two_decimals() {
        assert_eq!(yield_text(5.1), "5.10");
        assert_eq!(yield_text(3.5), "3.50");
        assert_eq!(yield_text(4.87), "4.87");
    }

    #[test]
    fn test_error_texts_are_stable() {
        let validation: PredictError = ValidationError::OutOfRange {
            field: "ph",
            value: 15.0,
            min: 0.0,
            max: 14.0,
        }
        .into();
        assert_eq!(
            error_text(&validation),
            "Invalid input: ph must be between 0 and 14, got 15."
        );

        let encoding: PredictError = EncodingError::new("Soil_Type", "Peaty").into();
        assert_eq!(error_text(&encoding), "Unknown crop or soil type.");

        assert_eq!(
            error_text(&PredictError::unavailable(Domain::Crop)),
            "The crop model is currently unavailable."
        );
        assert_eq!(
            error_text(&PredictError::inference(Domain::Yield, "boom")),
            "Prediction failed. Please try again."
        );
    }

    #[test]
    fn test_page_result_folds_both_arms() {
        let ok: Result<f64, PredictError> = Ok(5.1);
        let formatted = page_result(ok, yield_text);
        assert_eq!(formatted.text, "5.10");
        assert!(!formatted.is_error);

        let err: Result<f64, PredictError> = Err(PredictError::unavailable(Domain::Yield));
        let formatted = page_result(err, yield_text);
        assert!(formatted.is_error);
    }
}
