//! Reference dataset intake
//!
//! The dataset provider supplies two things: the distinct task-type labels
//! that seed the encoder's code table (in first-encounter order, which is
//! load-bearing), and aggregate statistics the dashboard displays. Records
//! arrive as NDJSON (one record per line) or a JSON array.

use crate::encoder::TaskTypeTable;
use crate::error::PipelineError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One historical task observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task type label; distinct values define the task-type code table
    pub task_description: String,
    pub priority: String,
    pub mood: String,
    pub days_until_deadline: i64,
    pub workload_hours: f64,
    /// Observed duration in hours
    pub estimated_duration: f64,
}

/// One team-member analytics row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub member: String,
    /// Productivity percentage
    pub productivity: f64,
    /// Stress level on the 0-10 scale
    pub stress_level: f64,
    pub tasks_completed: u32,
}

/// Aggregates over the team analytics rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub members: usize,
    pub avg_productivity: f64,
    pub avg_stress_level: f64,
    pub total_tasks_completed: u64,
}

/// One bucket of a histogram over a numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Parse NDJSON into typed records, reporting the offending line on failure.
pub fn parse_ndjson<T: DeserializeOwned>(ndjson: &str) -> Result<Vec<T>, PipelineError> {
    let mut records = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                return Err(PipelineError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    Ok(records)
}

/// Parse a JSON array of typed records.
pub fn parse_array<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, PipelineError> {
    let records: Vec<T> = serde_json::from_str(json)?;
    Ok(records)
}

/// Loaded reference dataset. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct TaskDataset {
    records: Vec<TaskRecord>,
}

impl TaskDataset {
    /// Wrap already-parsed records. The dataset must be non-empty: an empty
    /// dataset cannot seed the task-type table.
    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }
        Ok(Self { records })
    }

    pub fn parse_ndjson(ndjson: &str) -> Result<Self, PipelineError> {
        Self::from_records(parse_ndjson(ndjson)?)
    }

    pub fn parse_array(json: &str) -> Result<Self, PipelineError> {
        Self::from_records(parse_array(json)?)
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct task-type labels in first-encounter order.
    pub fn task_type_labels(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            let label = record.task_description.as_str();
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Build the encoder's task-type code table from this dataset.
    pub fn task_type_table(&self) -> TaskTypeTable {
        TaskTypeTable::from_labels(self.task_type_labels())
    }

    /// Task counts per priority label, most frequent first.
    pub fn priority_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.priority.as_str()).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        // Ties break alphabetically so the ordering is stable
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// Mean observed duration per mood label, ascending by mean.
    pub fn mean_duration_by_mood(&self) -> Vec<(String, f64)> {
        let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
        for record in &self.records {
            let entry = sums.entry(record.mood.as_str()).or_insert((0.0, 0));
            entry.0 += record.estimated_duration;
            entry.1 += 1;
        }
        let mut means: Vec<(String, f64)> = sums
            .into_iter()
            .map(|(label, (sum, count))| (label.to_string(), sum / count as f64))
            .collect();
        means.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        means
    }

    pub fn mean_estimated_duration(&self) -> f64 {
        let sum: f64 = self.records.iter().map(|r| r.estimated_duration).sum();
        sum / self.records.len() as f64
    }

    /// Histogram over workload hours.
    pub fn workload_histogram(&self, bins: usize) -> Vec<HistogramBin> {
        histogram(self.records.iter().map(|r| r.workload_hours), bins)
    }

    /// Histogram over days until deadline.
    pub fn deadline_histogram(&self, bins: usize) -> Vec<HistogramBin> {
        histogram(
            self.records.iter().map(|r| r.days_until_deadline as f64),
            bins,
        )
    }
}

/// Equal-width histogram over a value stream. Returns no bins for an empty
/// stream or a zero bin count; a constant stream lands in a single bin.
fn histogram<I: Iterator<Item = f64>>(values: I, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in &values {
        let mut index = ((value - min) / width) as usize;
        // The maximum value falls into the last bin, not one past it
        if index >= bins {
            index = bins - 1;
        }
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Summarize team analytics rows. Returns None for an empty input.
pub fn team_summary(records: &[TeamRecord]) -> Option<TeamSummary> {
    if records.is_empty() {
        return None;
    }
    let members = records.len();
    let avg_productivity = records.iter().map(|r| r.productivity).sum::<f64>() / members as f64;
    let avg_stress_level = records.iter().map(|r| r.stress_level).sum::<f64>() / members as f64;
    let total_tasks_completed = records.iter().map(|r| r.tasks_completed as u64).sum();

    Some(TeamSummary {
        members,
        avg_productivity,
        avg_stress_level,
        total_tasks_completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_ndjson() -> &'static str {
        concat!(
            r#"{"task_description": "Bug fix", "priority": "High", "mood": "Tired", "days_until_deadline": 7, "workload_hours": 6.0, "estimated_duration": 9.5}"#,
            "\n",
            r#"{"task_description": "Code review", "priority": "Low", "mood": "Happy", "days_until_deadline": 14, "workload_hours": 4.0, "estimated_duration": 2.5}"#,
            "\n",
            r#"{"task_description": "Bug fix", "priority": "High", "mood": "Happy", "days_until_deadline": 3, "workload_hours": 8.0, "estimated_duration": 5.5}"#,
            "\n",
            r#"{"task_description": "Research", "priority": "Medium", "mood": "Calm", "days_until_deadline": 21, "workload_hours": 5.0, "estimated_duration": 12.0}"#,
            "\n",
        )
    }

    #[test]
    fn test_parse_ndjson() {
        let dataset = TaskDataset::parse_ndjson(sample_ndjson()).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.records()[0].task_description, "Bug fix");
    }

    #[test]
    fn test_parse_ndjson_skips_blank_lines() {
        let input = format!("\n{}\n\n", sample_ndjson());
        let dataset = TaskDataset::parse_ndjson(&input).unwrap();
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let input = format!("{}not json\n", sample_ndjson());
        let err = TaskDataset::parse_ndjson(&input).unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_parse_array() {
        let json = format!(
            "[{}]",
            sample_ndjson().lines().collect::<Vec<_>>().join(",")
        );
        let dataset = TaskDataset::parse_array(&json).unwrap();
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = TaskDataset::parse_ndjson("\n\n").unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset));
    }

    #[test]
    fn test_task_type_labels_first_encounter_order() {
        let dataset = TaskDataset::parse_ndjson(sample_ndjson()).unwrap();
        assert_eq!(
            dataset.task_type_labels(),
            vec!["Bug fix", "Code review", "Research"]
        );

        let table = dataset.task_type_table();
        assert_eq!(table.code("Bug fix"), 0);
        assert_eq!(table.code("Code review"), 1);
        assert_eq!(table.code("Research"), 2);
    }

    #[test]
    fn test_priority_counts_sorted_descending() {
        let dataset = TaskDataset::parse_ndjson(sample_ndjson()).unwrap();
        let counts = dataset.priority_counts();
        assert_eq!(counts[0], ("High".to_string(), 2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_mean_duration_by_mood_ascending() {
        let dataset = TaskDataset::parse_ndjson(sample_ndjson()).unwrap();
        let means = dataset.mean_duration_by_mood();

        // Happy: (2.5 + 5.5) / 2 = 4.0, Tired: 9.5, Calm: 12.0
        assert_eq!(means[0].0, "Happy");
        assert!((means[0].1 - 4.0).abs() < 1e-9);
        assert_eq!(means[2].0, "Calm");

        let mut previous = f64::NEG_INFINITY;
        for (_, mean) in &means {
            assert!(*mean >= previous);
            previous = *mean;
        }
    }

    #[test]
    fn test_workload_histogram_covers_all_records() {
        let dataset = TaskDataset::parse_ndjson(sample_ndjson()).unwrap();
        let bins = dataset.workload_histogram(4);

        assert_eq!(bins.len(), 4);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, dataset.len());
        // Max value (8.0) lands in the last bin
        assert!(bins.last().unwrap().count >= 1);
    }

    #[test]
    fn test_histogram_constant_column() {
        let bins = histogram([5.0, 5.0, 5.0].into_iter(), 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_team_summary() {
        let records = vec![
            TeamRecord {
                member: "alice".to_string(),
                productivity: 80.0,
                stress_level: 4.0,
                tasks_completed: 30,
            },
            TeamRecord {
                member: "bob".to_string(),
                productivity: 60.0,
                stress_level: 6.0,
                tasks_completed: 20,
            },
        ];

        let summary = team_summary(&records).unwrap();
        assert_eq!(summary.members, 2);
        assert!((summary.avg_productivity - 70.0).abs() < 1e-9);
        assert!((summary.avg_stress_level - 5.0).abs() < 1e-9);
        assert_eq!(summary.total_tasks_completed, 50);
    }

    #[test]
    fn test_team_summary_empty() {
        assert!(team_summary(&[]).is_none());
    }
}
