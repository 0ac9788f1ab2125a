//! Process-wide shared resources
//!
//! The dataset and model artifacts load once, at an explicit initialization
//! boundary, and are shared read-only afterwards. Every interaction
//! recomputes from these immutable resources; nothing here mutates after
//! [`Workspace::initialize`] returns.

use crate::dataset::TaskDataset;
use crate::encoder::FeatureEncoder;
use crate::model::{LinearDurationModel, RecommendationModel};
use std::sync::OnceLock;

static WORKSPACE: OnceLock<Workspace> = OnceLock::new();

/// Loaded, read-only resources: dataset, encoder, and model artifacts
#[derive(Debug)]
pub struct Workspace {
    dataset: TaskDataset,
    encoder: FeatureEncoder,
    duration_model: LinearDurationModel,
    recommendation_model: Option<RecommendationModel>,
}

impl Workspace {
    /// Install the loaded resources as the process-wide workspace.
    ///
    /// The encoder's task-type table is built here, from the dataset, so the
    /// label-to-code coupling is fixed at this boundary. If a workspace was
    /// already installed, the existing one is returned and the new resources
    /// are dropped.
    pub fn initialize(
        dataset: TaskDataset,
        duration_model: LinearDurationModel,
        recommendation_model: Option<RecommendationModel>,
    ) -> &'static Workspace {
        WORKSPACE.get_or_init(|| {
            let encoder = FeatureEncoder::new(dataset.task_type_table());
            Workspace {
                dataset,
                encoder,
                duration_model,
                recommendation_model,
            }
        })
    }

    /// The installed workspace, if initialization has happened.
    pub fn get() -> Option<&'static Workspace> {
        WORKSPACE.get()
    }

    pub fn dataset(&self) -> &TaskDataset {
        &self.dataset
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn duration_model(&self) -> &LinearDurationModel {
        &self.duration_model
    }

    pub fn recommendation_model(&self) -> Option<&RecommendationModel> {
        self.recommendation_model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> TaskDataset {
        TaskDataset::parse_ndjson(concat!(
            r#"{"task_description": "Bug fix", "priority": "High", "mood": "Tired", "days_until_deadline": 7, "workload_hours": 6.0, "estimated_duration": 9.5}"#,
            "\n",
            r#"{"task_description": "Research", "priority": "Low", "mood": "Calm", "days_until_deadline": 20, "workload_hours": 3.0, "estimated_duration": 11.0}"#,
            "\n",
        ))
        .unwrap()
    }

    fn sample_model() -> LinearDurationModel {
        LinearDurationModel::new(vec![0.5, 0.2, 0.3, 0.1, 0.4, 1.0, 0.02], 1.5).unwrap()
    }

    // One test covers the whole lifecycle: OnceLock state is process-global,
    // so splitting these assertions across tests would order-depend.
    #[test]
    fn test_initialize_once_and_share() {
        assert!(Workspace::get().is_none());

        let workspace = Workspace::initialize(sample_dataset(), sample_model(), None);
        assert_eq!(workspace.dataset().len(), 2);
        assert_eq!(workspace.encoder().task_types().code("Bug fix"), 0);
        assert_eq!(workspace.encoder().task_types().code("Research"), 1);
        assert!(workspace.recommendation_model().is_none());

        // A second initialize keeps the first workspace
        let again = Workspace::initialize(sample_dataset(), sample_model(), None);
        assert!(std::ptr::eq(workspace, again));

        let fetched = Workspace::get().expect("workspace installed");
        assert!(std::ptr::eq(workspace, fetched));
    }
}
