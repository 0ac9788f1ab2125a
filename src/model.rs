//! Prediction model artifacts
//!
//! The duration model is trained elsewhere and arrives as a serialized
//! artifact; the only contract between it and this crate is the feature
//! ordering in [`FeatureVector::to_array`]. The [`DurationModel`] trait is
//! the seam: the pipeline never sees past it.

use crate::error::PipelineError;
use crate::types::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Opaque duration predictor over the fixed feature ordering
pub trait DurationModel {
    /// Predicted task duration in hours
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Linear duration model deserialized from a JSON artifact.
///
/// The artifact carries one weight per feature slot plus an intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearDurationModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearDurationModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Result<Self, PipelineError> {
        let model = Self { weights, intercept };
        model.validate()?;
        Ok(model)
    }

    /// Load a model artifact from JSON, checking the weight arity.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(PipelineError::InvalidModel(format!(
                "expected {} weights, found {}",
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err(PipelineError::InvalidModel(
                "weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl DurationModel for LinearDurationModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let inputs = features.to_array();
        let dot: f64 = self
            .weights
            .iter()
            .zip(inputs.iter())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept
    }
}

/// One class row of the recommendation model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRow {
    pub label: String,
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Recommendation model: scores every known task type against the feature
/// vector and returns the best-scoring label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationModel {
    classes: Vec<ClassRow>,
}

impl RecommendationModel {
    pub fn new(classes: Vec<ClassRow>) -> Result<Self, PipelineError> {
        let model = Self { classes };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.classes.is_empty() {
            return Err(PipelineError::InvalidModel(
                "recommendation model has no classes".to_string(),
            ));
        }
        for class in &self.classes {
            if class.weights.len() != FEATURE_COUNT {
                return Err(PipelineError::InvalidModel(format!(
                    "class {:?}: expected {} weights, found {}",
                    class.label,
                    FEATURE_COUNT,
                    class.weights.len()
                )));
            }
        }
        Ok(())
    }

    /// Highest-scoring task type for the given features.
    pub fn recommend(&self, features: &FeatureVector) -> &str {
        let inputs = features.to_array();
        let mut best: (&str, f64) = ("", f64::NEG_INFINITY);
        for class in &self.classes {
            let score: f64 = class
                .weights
                .iter()
                .zip(inputs.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + class.bias;
            if score > best.1 {
                best = (class.label.as_str(), score);
            }
        }
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_features() -> FeatureVector {
        FeatureVector {
            priority_code: 3,
            mood_code: 6,
            task_type_code: 0,
            days_until_deadline: 7,
            workload_hours: 6.0,
            urgency_score: 2.3,
            stress_factor: 36.0,
        }
    }

    #[test]
    fn test_linear_model_predict() {
        let model =
            LinearDurationModel::new(vec![1.0, 0.5, 0.0, 0.1, 0.2, 1.0, 0.05], 2.0).unwrap();
        let features = make_features();

        // 3 + 3 + 0 + 0.7 + 1.2 + 2.3 + 1.8 + 2 = 14.0
        let predicted = model.predict(&features);
        assert!((predicted - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_model_arity_check() {
        let err = LinearDurationModel::new(vec![1.0, 2.0], 0.0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidModel(_)));
    }

    #[test]
    fn test_linear_model_rejects_non_finite() {
        let err =
            LinearDurationModel::new(vec![1.0, f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0], 0.0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidModel(_)));
    }

    #[test]
    fn test_linear_model_json_round_trip() {
        let model =
            LinearDurationModel::new(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5], 1.0).unwrap();
        let json = model.to_json().unwrap();
        let loaded = LinearDurationModel::from_json(&json).unwrap();

        let features = make_features();
        assert_eq!(model.predict(&features), loaded.predict(&features));
    }

    #[test]
    fn test_linear_model_from_json_rejects_bad_arity() {
        let err =
            LinearDurationModel::from_json(r#"{"weights": [1.0, 2.0], "intercept": 0.0}"#)
                .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidModel(_)));
    }

    #[test]
    fn test_recommendation_argmax() {
        let model = RecommendationModel::new(vec![
            ClassRow {
                label: "Bug fix".to_string(),
                weights: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                bias: 0.0,
            },
            ClassRow {
                label: "Documentation".to_string(),
                weights: vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                bias: 0.0,
            },
        ])
        .unwrap();

        // mood_code (6) dominates priority_code (3)
        assert_eq!(model.recommend(&make_features()), "Documentation");
    }

    #[test]
    fn test_recommendation_rejects_empty() {
        let err = RecommendationModel::new(vec![]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidModel(_)));
    }

    #[test]
    fn test_recommendation_rejects_ragged_rows() {
        let err = RecommendationModel::new(vec![ClassRow {
            label: "Bug fix".to_string(),
            weights: vec![1.0],
            bias: 0.0,
        }])
        .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidModel(_)));
    }
}
