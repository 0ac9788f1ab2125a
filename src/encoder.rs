//! Feature encoding
//!
//! This module maps human-readable task attributes into the numeric feature
//! vector the duration model consumes:
//! - Fixed priority and mood code tables
//! - Task-type codes assigned from the reference dataset at load time
//! - Derived urgency and stress-factor features
//!
//! Unrecognized labels never fail: each table substitutes a documented
//! default code instead, matching what the trained model saw.

use crate::types::{FeatureVector, TaskAttributes};
use std::collections::HashMap;

/// Code substituted for an unrecognized priority label ("Medium")
pub const DEFAULT_PRIORITY_CODE: u32 = 2;

/// Code substituted for an unrecognized mood label ("Calm")
pub const DEFAULT_MOOD_CODE: u32 = 1;

/// Code substituted for a task type absent from the reference dataset
pub const DEFAULT_TASK_TYPE_CODE: u32 = 0;

/// Horizon the urgency feature is scaled against, in days
pub const DEADLINE_HORIZON_DAYS: f64 = 30.0;

/// Map a priority label to its model code.
///
/// Not ordered by severity: Critical maps below Medium and High. These are
/// the exact codes the duration model was trained against, so the table is
/// a model contract and must not be reordered.
pub fn priority_code(label: &str) -> u32 {
    match label {
        "Low" => 0,
        "Medium" => 2,
        "High" => 3,
        "Critical" => 1,
        _ => DEFAULT_PRIORITY_CODE,
    }
}

/// Map a mood label to its model code.
///
/// This table is alphabetical over the known moods. The stress monitor keeps
/// its own mood-to-severity table with a different scale; the two are not
/// interchangeable.
pub fn mood_code(label: &str) -> u32 {
    match label {
        "Anxious" => 0,
        "Calm" => 1,
        "Happy" => 2,
        "Motivated" => 3,
        "Neutral" => 4,
        "Stressed" => 5,
        "Tired" => 6,
        _ => DEFAULT_MOOD_CODE,
    }
}

/// Task-type code table built from the reference dataset.
///
/// Codes follow first-encounter order of the distinct labels in the dataset,
/// starting at 0. The table is immutable once built.
#[derive(Debug, Clone)]
pub struct TaskTypeTable {
    codes: HashMap<String, u32>,
}

impl TaskTypeTable {
    /// Build the table from labels in dataset order. Duplicates keep their
    /// first-encounter code.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes = HashMap::new();
        let mut next = 0u32;
        for label in labels {
            let label = label.as_ref();
            if !codes.contains_key(label) {
                codes.insert(label.to_string(), next);
                next += 1;
            }
        }
        Self { codes }
    }

    /// Look up a task-type code, substituting the default for unknown labels.
    pub fn code(&self, label: &str) -> u32 {
        self.codes
            .get(label)
            .copied()
            .unwrap_or(DEFAULT_TASK_TYPE_CODE)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Feature encoder for turning task attributes into model input
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    task_types: TaskTypeTable,
}

impl FeatureEncoder {
    pub fn new(task_types: TaskTypeTable) -> Self {
        Self { task_types }
    }

    pub fn task_types(&self) -> &TaskTypeTable {
        &self.task_types
    }

    /// Encode task attributes into the fixed-order feature vector.
    ///
    /// Total function: unknown labels resolve to default codes and no numeric
    /// range is enforced here. The deadline divides the constant horizon, not
    /// the other way around, so a zero deadline is safe.
    pub fn encode(&self, attrs: &TaskAttributes) -> FeatureVector {
        let priority_code = priority_code(&attrs.priority);
        let mood_code = mood_code(&attrs.mood);
        let task_type_code = self.task_types.code(&attrs.task_type);

        let urgency_score = priority_code as f64
            * (DEADLINE_HORIZON_DAYS - attrs.days_until_deadline as f64)
            / DEADLINE_HORIZON_DAYS;
        let stress_factor = mood_code as f64 * attrs.workload_hours;

        FeatureVector {
            priority_code,
            mood_code,
            task_type_code,
            days_until_deadline: attrs.days_until_deadline,
            workload_hours: attrs.workload_hours,
            urgency_score,
            stress_factor,
        }
    }
}
