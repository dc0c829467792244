//! Categorical encoders
//!
//! A `CategoryEncoder` maps a categorical text value to the integer code
//! the models were trained on: position in the trained vocabulary. Matching
//! is exact (after trimming); out-of-vocabulary input is an `EncodingError`,
//! never a default code.

use std::path::Path;

use anyhow::Context;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::EncodingError;

/// On-disk shape: `{ "feature": "Soil_Type", "classes": ["Black", ...] }`.
#[derive(Debug, Deserialize)]
struct EncoderArtifact {
    feature: String,
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    feature: String,
    classes: Vec<String>,
    index: FxHashMap<String, i64>,
}

impl CategoryEncoder {
    /// Build an encoder from a vocabulary in code order.
    ///
    /// Codes are assigned by position; a duplicated class keeps its first
    /// position.
    pub fn new(feature: impl Into<String>, classes: Vec<String>) -> Self {
        let mut index = FxHashMap::default();
        for (code, class) in classes.iter().enumerate() {
            index.entry(class.clone()).or_insert(code as i64);
        }
        Self {
            feature: feature.into(),
            classes,
            index,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read encoder artifact: {}", path.display()))?;
        let artifact: EncoderArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse encoder artifact: {}", path.display()))?;
        if artifact.classes.is_empty() {
            return Err(anyhow::anyhow!(
                "Encoder artifact has an empty vocabulary: {}",
                path.display()
            ));
        }
        Ok(Self::new(artifact.feature, artifact.classes))
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn vocabulary_size(&self) -> usize {
        self.classes.len()
    }

    /// Encode one raw form value. Exact match on the trimmed input.
    pub fn encode(&self, raw: &str) -> Result<i64, EncodingError> {
        let trimmed = raw.trim();
        self.index
            .get(trimmed)
            .copied()
            .ok_or_else(|| EncodingError::new(self.feature.clone(), trimmed))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn soil_encoder() -> CategoryEncoder {
        CategoryEncoder::new(
            "Soil_Type",
            vec![
                "Black".to_string(),
                "Clayey".to_string(),
                "Loamy".to_string(),
                "Red".to_string(),
                "Sandy".to_string(),
            ],
        )
    }

    #[test]
    fn test_encode_assigns_position_codes() {
        let enc = soil_encoder();
        assert_eq!(enc.encode("Black").unwrap(), 0);
        assert_eq!(enc.encode("Loamy").unwrap(), 2);
        assert_eq!(enc.encode("Sandy").unwrap(), 4);
        assert_eq!(enc.vocabulary_size(), 5);
    }

    #[test]
    fn test_encode_trims_surrounding_whitespace() {
        let enc = soil_encoder();
        assert_eq!(enc.encode("  Red  ").unwrap(), 3);
    }

    #[test]
    fn test_out_of_vocabulary_is_an_error_not_a_default() {
        let enc = soil_encoder();
        let err = enc.encode("Peaty").unwrap_err();
        assert_eq!(err.feature, "Soil_Type");
        assert_eq!(err.value, "Peaty");
        // Exact match: case differences are out-of-vocabulary too.
        assert!(enc.encode("black").is_err());
        assert!(enc.encode("").is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "farm_advisor_encoder_test_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "feature": "Region", "classes": ["East", "North", "South", "West"] }"#,
        )
        .expect("write test artifact");

        let enc = CategoryEncoder::from_file(&path).expect("load test artifact");
        assert_eq!(enc.feature(), "Region");
        assert_eq!(enc.encode("West").unwrap(), 3);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_from_file_rejects_empty_vocabulary() {
        let path = std::env::temp_dir().join(format!(
            "farm_advisor_encoder_empty_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "feature": "Region", "classes": [] }"#)
            .expect("write test artifact");

        assert!(CategoryEncoder::from_file(&path).is_err());

        let _ = std::fs::remove_file(&path);
    }
}
