//! Core types for the Taskpulse pipeline
//!
//! This module defines the value objects that flow through the two scoring
//! paths: raw task attributes, the encoded feature vector, stress samples,
//! and the reports handed back to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of scalars in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 7;

/// Raw user-facing attributes of a single task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAttributes {
    /// Task type label (e.g., "Bug fix", "Code review")
    pub task_type: String,
    /// Priority label (Low, Medium, High, Critical)
    pub priority: String,
    /// Current mood label (Happy, Motivated, Calm, Neutral, Tired, Anxious, Stressed)
    pub mood: String,
    /// Days until the task deadline (callers keep this in 1-30)
    pub days_until_deadline: i64,
    /// Current workload in hours
    pub workload_hours: f64,
}

/// Encoded numeric features for one task.
///
/// The slot ordering of [`to_array`](FeatureVector::to_array) is what the
/// externally trained duration model expects. Reordering the fields here
/// silently changes what every weight in the model artifact means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub priority_code: u32,
    pub mood_code: u32,
    pub task_type_code: u32,
    pub days_until_deadline: i64,
    pub workload_hours: f64,
    pub urgency_score: f64,
    pub stress_factor: f64,
}

impl FeatureVector {
    /// Flatten into the fixed model-input ordering.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.priority_code as f64,
            self.mood_code as f64,
            self.task_type_code as f64,
            self.days_until_deadline as f64,
            self.workload_hours,
            self.urgency_score,
            self.stress_factor,
        ]
    }
}

/// Predicted-duration band, from the thresholds the dashboard surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBand {
    /// Under 5 hours
    Quick,
    Standard,
    /// Over 15 hours
    Long,
}

impl DurationBand {
    pub fn from_hours(hours: f64) -> Self {
        if hours > 15.0 {
            DurationBand::Long
        } else if hours < 5.0 {
            DurationBand::Quick
        } else {
            DurationBand::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBand::Quick => "quick",
            DurationBand::Standard => "standard",
            DurationBand::Long => "long",
        }
    }

    /// Advice line shown alongside a prediction, if any
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            DurationBand::Long => Some("Long task! Consider breaking into chunks."),
            DurationBand::Quick => Some("Quick task! Good for filling gaps."),
            DurationBand::Standard => None,
        }
    }
}

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Full output of a duration prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub producer: Producer,
    pub computed_at_utc: DateTime<Utc>,
    /// Inputs echoed back for display and audit
    pub attributes: TaskAttributes,
    pub features: FeatureVector,
    /// Model output in hours
    pub predicted_hours: f64,
    pub band: DurationBand,
    /// Suggested task type from the recommendation model, when one is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_task: Option<String>,
}

/// One stress-monitor reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressSample {
    /// Hours worked today (0-12)
    pub work_hours_today: f64,
    /// Pending task count (0-20)
    pub pending_tasks: u32,
    /// Current mood label
    pub mood: String,
    /// Days to the nearest deadline (clamped to >= 1 during scoring)
    pub days_to_deadline: i64,
}

/// Severity bucket for a stress score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressSeverity {
    Healthy,
    High,
    Critical,
}

impl StressSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressSeverity::Healthy => "healthy",
            StressSeverity::High => "high",
            StressSeverity::Critical => "critical",
        }
    }
}

/// Full output of a stress evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressReport {
    pub computed_at_utc: DateTime<Utc>,
    /// Inputs echoed back for display and audit
    pub sample: StressSample,
    /// Severity code the mood label resolved to
    pub mood_severity: u32,
    /// Stress index in [0, 10], one decimal
    pub score: f64,
    pub severity: StressSeverity,
}
