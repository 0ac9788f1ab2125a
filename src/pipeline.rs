//! Pipeline orchestration
//!
//! This module provides the public API for duration prediction: it wires the
//! feature encoder to a loaded duration model and assembles the report the
//! presentation layer displays. Stress evaluation is independent and lives in
//! [`crate::stress`].

use crate::dataset::TaskDataset;
use crate::encoder::FeatureEncoder;
use crate::error::PipelineError;
use crate::model::{DurationModel, LinearDurationModel, RecommendationModel};
use crate::types::{DurationBand, PredictionReport, Producer, TaskAttributes};
use crate::{PRODUCER_NAME, PULSE_VERSION};
use chrono::Utc;
use uuid::Uuid;

/// Duration predictor over an encoder and an opaque model.
///
/// Stateless across calls: every prediction recomputes from its inputs.
pub struct TaskOptimizer {
    encoder: FeatureEncoder,
    model: Box<dyn DurationModel>,
    recommender: Option<RecommendationModel>,
    instance_id: String,
}

impl TaskOptimizer {
    pub fn new(encoder: FeatureEncoder, model: Box<dyn DurationModel>) -> Self {
        Self {
            encoder,
            model,
            recommender: None,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Build the encoder from the reference dataset's task-type table.
    pub fn from_dataset(dataset: &TaskDataset, model: Box<dyn DurationModel>) -> Self {
        Self::new(FeatureEncoder::new(dataset.task_type_table()), model)
    }

    pub fn with_instance_id(mut self, instance_id: String) -> Self {
        self.instance_id = instance_id;
        self
    }

    /// Attach a recommendation model; its suggestion is included in reports.
    pub fn with_recommender(mut self, recommender: RecommendationModel) -> Self {
        self.recommender = Some(recommender);
        self
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Encode attributes, run the model, and assemble the report.
    pub fn predict(&self, attrs: &TaskAttributes) -> PredictionReport {
        let features = self.encoder.encode(attrs);
        let predicted_hours = self.model.predict(&features);
        let recommended_task = self
            .recommender
            .as_ref()
            .map(|r| r.recommend(&features).to_string());

        PredictionReport {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: PULSE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now(),
            attributes: attrs.clone(),
            features,
            band: DurationBand::from_hours(predicted_hours),
            predicted_hours,
            recommended_task,
        }
    }

    pub fn predict_to_json(&self, attrs: &TaskAttributes) -> Result<String, PipelineError> {
        let report = self.predict(attrs);
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

/// One-shot convenience: parse the dataset and model artifacts and predict.
///
/// # Arguments
/// * `dataset_ndjson` - Reference dataset as NDJSON task records
/// * `model_json` - Serialized linear duration model artifact
/// * `attrs` - The task to predict
pub fn predict_duration(
    dataset_ndjson: &str,
    model_json: &str,
    attrs: &TaskAttributes,
) -> Result<PredictionReport, PipelineError> {
    let dataset = TaskDataset::parse_ndjson(dataset_ndjson)?;
    let model = LinearDurationModel::from_json(model_json)?;
    let optimizer = TaskOptimizer::from_dataset(&dataset, Box::new(model));
    Ok(optimizer.predict(attrs))
}
