//! Stress index computation
//!
//! A weighted linear combination of four workload signals, bounded to [0, 10]
//! and bucketed into a severity label. Independent of the feature encoder:
//! the mood table here carries severity weights on a different scale than the
//! encoder's mood codes, and the two stay separate.

use crate::types::{StressReport, StressSample, StressSeverity};
use chrono::Utc;

/// Severity substituted for an unrecognized mood label
pub const DEFAULT_MOOD_SEVERITY: u32 = 5;

/// Score at or above which stress is Critical
pub const CRITICAL_THRESHOLD: f64 = 8.0;

/// Score at or above which stress is High
pub const HIGH_THRESHOLD: f64 = 6.0;

// Term weights. They sum to 10, the scale ceiling.
const WORK_HOURS_WEIGHT: f64 = 3.0;
const PENDING_TASKS_WEIGHT: f64 = 2.0;
const MOOD_WEIGHT: f64 = 3.0;
const DEADLINE_WEIGHT: f64 = 2.0;

// Term denominators
const WORK_HOURS_SCALE: f64 = 12.0;
const PENDING_TASKS_SCALE: f64 = 10.0;
const MOOD_SCALE: f64 = 10.0;

/// Map a mood label to its stress severity weight
pub fn mood_severity(label: &str) -> u32 {
    match label {
        "Happy" => 1,
        "Motivated" => 2,
        "Calm" => 2,
        "Neutral" => 5,
        "Tired" => 6,
        "Anxious" => 8,
        "Stressed" => 9,
        _ => DEFAULT_MOOD_SEVERITY,
    }
}

/// Compute the stress index for a sample.
///
/// Returns a score in [0, 10] rounded to one decimal. Days-to-deadline is
/// clamped to at least 1 before the reciprocal term, so a zero or negative
/// deadline cannot divide by zero. Total function, never fails.
pub fn score(sample: &StressSample) -> f64 {
    let deadline_days = sample.days_to_deadline.max(1) as f64;

    let raw = (sample.work_hours_today / WORK_HOURS_SCALE) * WORK_HOURS_WEIGHT
        + (sample.pending_tasks as f64 / PENDING_TASKS_SCALE) * PENDING_TASKS_WEIGHT
        + (mood_severity(&sample.mood) as f64 / MOOD_SCALE) * MOOD_WEIGHT
        + (1.0 / deadline_days) * DEADLINE_WEIGHT;

    let rounded = (raw * 10.0).round() / 10.0;
    rounded.min(10.0)
}

/// Bucket a score into its severity label. Lower edges are inclusive.
pub fn severity(score: f64) -> StressSeverity {
    if score >= CRITICAL_THRESHOLD {
        StressSeverity::Critical
    } else if score >= HIGH_THRESHOLD {
        StressSeverity::High
    } else {
        StressSeverity::Healthy
    }
}

/// Evaluate a sample into a full stress report.
pub fn evaluate(sample: &StressSample) -> StressReport {
    let score = score(sample);
    StressReport {
        computed_at_utc: Utc::now(),
        sample: sample.clone(),
        mood_severity: mood_severity(&sample.mood),
        score,
        severity: severity(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_sample(work_hours: f64, pending: u32, mood: &str, deadline: i64) -> StressSample {
        StressSample {
            work_hours_today: work_hours,
            pending_tasks: pending,
            mood: mood.to_string(),
            days_to_deadline: deadline,
        }
    }

    #[test]
    fn test_mood_severity_table() {
        assert_eq!(mood_severity("Happy"), 1);
        assert_eq!(mood_severity("Motivated"), 2);
        assert_eq!(mood_severity("Calm"), 2);
        assert_eq!(mood_severity("Neutral"), 5);
        assert_eq!(mood_severity("Tired"), 6);
        assert_eq!(mood_severity("Anxious"), 8);
        assert_eq!(mood_severity("Stressed"), 9);
    }

    #[test]
    fn test_mood_severity_unknown_defaults() {
        assert_eq!(mood_severity("Exhausted"), DEFAULT_MOOD_SEVERITY);
        assert_eq!(mood_severity(""), 5);
    }

    #[test]
    fn test_relaxed_day_is_healthy() {
        let sample = make_sample(0.0, 0, "Happy", 15);
        let score = score(&sample);

        // (1/10)*3 + (1/15)*2 = 0.3 + 0.13 -> 0.4
        assert!(score <= 6.0);
        assert_eq!(severity(score), StressSeverity::Healthy);
    }

    #[test]
    fn test_worst_case_clamps_to_ten() {
        let sample = make_sample(12.0, 20, "Stressed", 1);

        // (12/12)*3 + (20/10)*2 + (9/10)*3 + (1/1)*2 = 3 + 4 + 2.7 + 2 = 11.7
        assert_eq!(score(&sample), 10.0);
        assert_eq!(severity(10.0), StressSeverity::Critical);
    }

    #[test]
    fn test_score_rounds_to_one_decimal() {
        let sample = make_sample(6.0, 5, "Neutral", 5);
        // (6/12)*3 + (5/10)*2 + (5/10)*3 + (1/5)*2 = 1.5 + 1.0 + 1.5 + 0.4 = 4.4
        assert_eq!(score(&sample), 4.4);
    }

    #[test]
    fn test_zero_deadline_treated_as_one() {
        let at_zero = make_sample(6.0, 5, "Neutral", 0);
        let at_one = make_sample(6.0, 5, "Neutral", 1);
        assert_eq!(score(&at_zero), score(&at_one));
    }

    #[test]
    fn test_negative_deadline_treated_as_one() {
        let negative = make_sample(3.0, 2, "Calm", -4);
        let at_one = make_sample(3.0, 2, "Calm", 1);
        assert_eq!(score(&negative), score(&at_one));
    }

    #[test]
    fn test_severity_boundaries_inclusive() {
        assert_eq!(severity(5.9), StressSeverity::Healthy);
        assert_eq!(severity(6.0), StressSeverity::High);
        assert_eq!(severity(7.9), StressSeverity::High);
        assert_eq!(severity(8.0), StressSeverity::Critical);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let sample = make_sample(8.0, 12, "Anxious", 2);
        let first = evaluate(&sample);
        let second = evaluate(&sample);

        assert_eq!(first.score, second.score);
        assert_eq!(first.severity, second.severity);
        assert_eq!(first.mood_severity, second.mood_severity);
    }

    #[test]
    fn test_report_echoes_sample() {
        let sample = make_sample(8.0, 12, "Anxious", 2);
        let report = evaluate(&sample);

        assert_eq!(report.sample.pending_tasks, 12);
        assert_eq!(report.mood_severity, 8);
    }
}
