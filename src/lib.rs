//! Taskpulse - Compute engine for task duration features and workload stress signals
//!
//! Taskpulse turns raw user-facing task attributes into the numeric inputs of
//! a pre-trained duration model, and turns workload readings into a bounded
//! stress index. Two independent, stateless scoring paths:
//!
//! - **Feature encoding**: categorical labels → fixed code tables → the
//!   seven-slot feature vector the duration model consumes
//! - **Stress index**: four workload signals → weighted score in [0, 10] →
//!   severity label
//!
//! The reference dataset seeds the encoder's task-type table and supplies the
//! aggregates a dashboard displays; model artifacts are loaded from JSON and
//! treated as opaque past the [`model::DurationModel`] seam.

pub mod dataset;
pub mod encoder;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod runtime;
pub mod stress;
pub mod types;

pub use error::PipelineError;
pub use pipeline::{predict_duration, TaskOptimizer};
pub use runtime::Workspace;
pub use stress::evaluate as evaluate_stress;
pub use types::{
    FeatureVector, PredictionReport, StressReport, StressSample, StressSeverity, TaskAttributes,
};

/// Taskpulse version embedded in all reports
pub const PULSE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "taskpulse";
