//! Request parsing
//!
//! The form DTOs keep the exact field names the original pages submit.
//! Every field arrives as text and is parsed here, so a bad number becomes
//! the gateway's own `ValidationError::NotNumeric` (rendered into the page)
//! rather than a transport-level rejection. Absent fields default to the
//! empty string for the same reason: a request with a field missing still
//! answers 200 with a rendered error, never a 422. The JSON API accepts the
//! same shapes with the same field names.

use serde::Deserialize;

use crate::error::ValidationError;

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|_| ValidationError::NotNumeric {
        field,
        value: trimmed.to_string(),
    })
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| ValidationError::NotNumeric {
        field,
        value: trimmed.to_string(),
    })
}

/// Yes/No form flag, fixed to two values at the parse boundary. Exactly
/// "Yes" (trimmed) is yes; every other spelling is no. Nothing downstream
/// compares raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Yes,
    No,
}

impl Flag {
    pub fn from_form(raw: &str) -> Self {
        if raw.trim() == "Yes" {
            Flag::Yes
        } else {
            Flag::No
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Flag::Yes)
    }

    pub fn as_feature(&self) -> f64 {
        match self {
            Flag::Yes => 1.0,
            Flag::No => 0.0,
        }
    }
}

// ============================================================================
// Crop recommendation
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CropForm {
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub p: String,
    #[serde(default)]
    pub k: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub ph: String,
    #[serde(default)]
    pub rainfall: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl CropForm {
    /// Parse all seven fields, failing fast in wire order.
    pub fn parse(&self) -> Result<CropRequest, ValidationError> {
        Ok(CropRequest {
            n: parse_number("n", &self.n)?,
            p: parse_number("p", &self.p)?,
            k: parse_number("k", &self.k)?,
            temperature: parse_number("temperature", &self.temperature)?,
            humidity: parse_number("humidity", &self.humidity)?,
            ph: parse_number("ph", &self.ph)?,
            rainfall: parse_number("rainfall", &self.rainfall)?,
        })
    }
}

// ============================================================================
// Fertilizer recommendation
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct FertilizerForm {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub moisture: String,
    #[serde(default)]
    pub soil: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub p: String,
    #[serde(default)]
    pub k: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FertilizerRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub soil: String,
    pub crop: String,
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

impl FertilizerForm {
    pub fn parse(&self) -> Result<FertilizerRequest, ValidationError> {
        Ok(FertilizerRequest {
            temperature: parse_number("temperature", &self.temperature)?,
            humidity: parse_number("humidity", &self.humidity)?,
            moisture: parse_number("moisture", &self.moisture)?,
            soil: self.soil.trim().to_string(),
            crop: self.crop.trim().to_string(),
            n: parse_number("n", &self.n)?,
            p: parse_number("p", &self.p)?,
            k: parse_number("k", &self.k)?,
        })
    }
}

// ============================================================================
// Yield estimation
// ============================================================================

/// Soil_Type and Weather_Condition are accepted from the form but unused by
/// the model path.
#[derive(Debug, Clone, Deserialize)]
pub struct YieldForm {
    #[serde(rename = "Region", default)]
    pub region: String,
    #[serde(rename = "Crop", default)]
    pub crop: String,
    #[serde(rename = "Soil_Type", default)]
    pub soil_type: String,
    #[serde(rename = "Rainfall_mm", default)]
    pub rainfall_mm: String,
    #[serde(rename = "Temperature_Celsius", default)]
    pub temperature_celsius: String,
    #[serde(rename = "Weather_Condition", default)]
    pub weather_condition: String,
    #[serde(rename = "Fertilizer_Used", default)]
    pub fertilizer_used: String,
    #[serde(rename = "Irrigation_Used", default)]
    pub irrigation_used: String,
    #[serde(rename = "Days_to_Harvest", default)]
    pub days_to_harvest: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldRequest {
    pub region: String,
    pub crop: String,
    pub rainfall_mm: f64,
    pub temperature_celsius: f64,
    pub fertilizer_used: Flag,
    pub irrigation_used: Flag,
    pub days_to_harvest: i64,
}

impl YieldForm {
    /// Days_to_Harvest is an integer on the wire; fractional text fails.
    pub fn parse(&self) -> Result<YieldRequest, ValidationError> {
        Ok(YieldRequest {
            region: self.region.trim().to_string(),
            crop: self.crop.trim().to_string(),
            rainfall_mm: parse_number("Rainfall_mm", &self.rainfall_mm)?,
            temperature_celsius: parse_number("Temperature_Celsius", &self.temperature_celsius)?,
            fertilizer_used: Flag::from_form(&self.fertilizer_used),
            irrigation_used: Flag::from_form(&self.irrigation_used),
            days_to_harvest: parse_integer("Days_to_Harvest", &self.days_to_harvest)?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn crop_form() -> CropForm {
        CropForm {
            n: "90".into(),
            p: "42".into(),
            k: "43".into(),
            temperature: "20.8".into(),
            humidity: "82.0".into(),
            ph: "6.5".into(),
            rainfall: "202.9".into(),
        }
    }

    #[test]
    fn test_crop_parse_happy_path() {
        let req = crop_form().parse().unwrap();
        assert_eq!(req.n, 90.0);
        assert_eq!(req.ph, 6.5);
        assert_eq!(req.rainfall, 202.9);
    }

    #[test]
    fn test_crop_parse_trims_whitespace() {
        let mut form = crop_form();
        form.temperature = "  20.8  ".into();
        assert_eq!(form.parse().unwrap().temperature, 20.8);
    }

    #[test]
    fn test_crop_parse_fails_fast_on_first_bad_field() {
        let mut form = crop_form();
        form.n = "abc".into();
        form.ph = "also-bad".into();
        let err = form.parse().unwrap_err();
        assert_eq!(err.field(), "n", "first offending field wins");
    }

    #[test]
    fn test_absent_fields_default_to_empty_and_fail_parse() {
        // A submission missing fields entirely still deserializes; the gap
        // surfaces as the gateway's own NotNumeric, not a transport error.
        let form: CropForm = serde_json::from_value(serde_json::json!({
            "n": "90",
            "p": "42"
        }))
        .expect("absent fields deserialize as empty");
        assert_eq!(form.k, "");
        match form.parse().unwrap_err() {
            ValidationError::NotNumeric { field, value } => {
                assert_eq!(field, "k", "first absent field wins");
                assert_eq!(value, "");
            }
            other => panic!("expected NotNumeric, got {:?}", other),
        }

        let form: FertilizerForm = serde_json::from_value(serde_json::json!({}))
            .expect("fully empty submission deserializes");
        assert_eq!(form.parse().unwrap_err().field(), "temperature");

        let form: YieldForm = serde_json::from_value(serde_json::json!({
            "Region": "East",
            "Crop": "Rice"
        }))
        .expect("absent yield fields deserialize as empty");
        assert_eq!(form.parse().unwrap_err().field(), "Rainfall_mm");
    }

    #[test]
    fn test_flag_is_strictly_two_valued() {
        assert_eq!(Flag::from_form("Yes"), Flag::Yes);
        assert_eq!(Flag::from_form("  Yes "), Flag::Yes);
        assert_eq!(Flag::from_form("yes"), Flag::No);
        assert_eq!(Flag::from_form("No"), Flag::No);
        assert_eq!(Flag::from_form("1"), Flag::No);
        assert_eq!(Flag::from_form(""), Flag::No);
        assert_eq!(Flag::Yes.as_feature(), 1.0);
        assert_eq!(Flag::No.as_feature(), 0.0);
    }

    #[test]
    fn test_yield_form_field_renames() {
        let form: YieldForm = serde_json::from_value(serde_json::json!({
            "Region": "East",
            "Crop": "Rice",
            "Soil_Type": "Clay",
            "Rainfall_mm": "800",
            "Temperature_Celsius": "27",
            "Weather_Condition": "Sunny",
            "Fertilizer_Used": "Yes",
            "Irrigation_Used": "No",
            "Days_to_Harvest": "120"
        }))
        .expect("wire names deserialize");
        let req = form.parse().unwrap();
        assert_eq!(req.region, "East");
        assert_eq!(req.fertilizer_used, Flag::Yes);
        assert_eq!(req.irrigation_used, Flag::No);
        assert_eq!(req.days_to_harvest, 120);
    }

    #[test]
    fn test_yield_tolerates_missing_unused_fields() {
        let form: YieldForm = serde_json::from_value(serde_json::json!({
            "Region": "East",
            "Crop": "Rice",
            "Rainfall_mm": "800",
            "Temperature_Celsius": "27",
            "Fertilizer_Used": "No",
            "Irrigation_Used": "No",
            "Days_to_Harvest": "120"
        }))
        .expect("unused fields may be omitted");
        assert!(form.parse().is_ok());
    }

    #[test]
    fn test_days_to_harvest_rejects_fractional_text() {
        let form: YieldForm = serde_json::from_value(serde_json::json!({
            "Region": "East",
            "Crop": "Rice",
            "Rainfall_mm": "800",
            "Temperature_Celsius": "27",
            "Fertilizer_Used": "Yes",
            "Irrigation_Used": "Yes",
            "Days_to_Harvest": "12.5"
        }))
        .unwrap();
        let err = form.parse().unwrap_err();
        assert_eq!(err.field(), "Days_to_Harvest");
    }

    #[test]
    fn test_fertilizer_parse_keeps_category_text() {
        let form = FertilizerForm {
            temperature: "26".into(),
            humidity: "52".into(),
            moisture: "38".into(),
            soil: " Sandy ".into(),
            crop: "Maize".into(),
            n: "37".into(),
            p: "0".into(),
            k: "0".into(),
        };
        let req = form.parse().unwrap();
        assert_eq!(req.soil, "Sandy");
        assert_eq!(req.crop, "Maize");
        assert_eq!(req.n, 37.0);
    }
}
