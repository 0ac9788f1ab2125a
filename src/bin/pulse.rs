//! Pulse CLI - Command-line interface for Taskpulse
//!
//! Commands:
//! - predict: Encode one task and run the duration model
//! - stress: Compute a stress report from flags
//! - monitor: Process streaming stress samples from stdin
//! - stats: Summarize the reference dataset and team analytics
//! - doctor: Diagnose artifact health and configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use taskpulse::dataset::{self, TaskDataset, TeamRecord};
use taskpulse::model::{LinearDurationModel, RecommendationModel};
use taskpulse::pipeline::TaskOptimizer;
use taskpulse::types::{StressSample, StressSeverity, TaskAttributes, FEATURE_COUNT};
use taskpulse::{PRODUCER_NAME, PULSE_VERSION};

/// Pulse - Task duration prediction and workload stress scoring
#[derive(Parser)]
#[command(name = "pulse")]
#[command(version = PULSE_VERSION)]
#[command(about = "Predict task durations and score workload stress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one task and run the duration model
    Predict {
        /// Reference dataset path (use - for stdin)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Duration model artifact path
        #[arg(short, long)]
        model: PathBuf,

        /// Recommendation model artifact path
        #[arg(long)]
        recommendation: Option<PathBuf>,

        /// Dataset format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Task type label
        #[arg(long)]
        task_type: String,

        /// Priority label (Low, Medium, High, Critical)
        #[arg(long, default_value = "Medium")]
        priority: String,

        /// Current mood label
        #[arg(long, default_value = "Neutral")]
        mood: String,

        /// Days until deadline (1-30)
        #[arg(long, default_value = "7")]
        deadline_days: i64,

        /// Current workload in hours
        #[arg(long, default_value = "6.0")]
        workload: f64,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a stress report from flags
    Stress {
        /// Hours worked today (0-12)
        #[arg(long, default_value = "6.0")]
        work_hours: f64,

        /// Pending task count (0-20)
        #[arg(long, default_value = "5")]
        pending_tasks: u32,

        /// Current mood label
        #[arg(long, default_value = "Neutral")]
        mood: String,

        /// Days to the nearest deadline
        #[arg(long, default_value = "5")]
        deadline_days: i64,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process streaming stress samples from stdin (NDJSON, one report per line)
    Monitor {
        /// Flush output after each report
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Summarize the reference dataset and team analytics
    Stats {
        /// Reference dataset path (use - for stdin)
        #[arg(short, long)]
        dataset: PathBuf,

        /// Team analytics path
        #[arg(long)]
        team: Option<PathBuf>,

        /// Dataset format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Histogram bin count
        #[arg(long, default_value = "10")]
        bins: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose artifact health and configuration
    Doctor {
        /// Check a reference dataset file (NDJSON)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Check a duration model artifact
        #[arg(long)]
        model: Option<PathBuf>,

        /// Check a recommendation model artifact
        #[arg(long)]
        recommendation: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PulseCliError> {
    match cli.command {
        Commands::Predict {
            dataset,
            model,
            recommendation,
            input_format,
            task_type,
            priority,
            mood,
            deadline_days,
            workload,
            json,
        } => cmd_predict(
            &dataset,
            &model,
            recommendation.as_deref(),
            input_format,
            TaskAttributes {
                task_type,
                priority,
                mood,
                days_until_deadline: deadline_days,
                workload_hours: workload,
            },
            json,
        ),

        Commands::Stress {
            work_hours,
            pending_tasks,
            mood,
            deadline_days,
            json,
        } => cmd_stress(
            StressSample {
                work_hours_today: work_hours,
                pending_tasks,
                mood,
                days_to_deadline: deadline_days,
            },
            json,
        ),

        Commands::Monitor { flush } => cmd_monitor(flush),

        Commands::Stats {
            dataset,
            team,
            input_format,
            bins,
            json,
        } => cmd_stats(&dataset, team.as_deref(), input_format, bins, json),

        Commands::Doctor {
            dataset,
            model,
            recommendation,
            json,
        } => cmd_doctor(
            dataset.as_deref(),
            model.as_deref(),
            recommendation.as_deref(),
            json,
        ),
    }
}

fn cmd_predict(
    dataset_path: &Path,
    model_path: &Path,
    recommendation_path: Option<&Path>,
    input_format: InputFormat,
    attrs: TaskAttributes,
    json: bool,
) -> Result<(), PulseCliError> {
    let dataset = load_dataset(dataset_path, &input_format)?;
    let model = LinearDurationModel::from_json(&fs::read_to_string(model_path)?)?;

    let mut optimizer = TaskOptimizer::from_dataset(&dataset, Box::new(model));
    if let Some(path) = recommendation_path {
        let recommender = RecommendationModel::from_json(&fs::read_to_string(path)?)?;
        optimizer = optimizer.with_recommender(recommender);
    }

    let report = optimizer.predict(&attrs);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Predicted Duration: {:.1} hours", report.predicted_hours);
        if let Some(advice) = report.band.advice() {
            println!("{}", advice);
        }
        if let Some(ref task) = report.recommended_task {
            println!("Recommended next task type: {}", task);
        }
    }

    Ok(())
}

fn cmd_stress(sample: StressSample, json: bool) -> Result<(), PulseCliError> {
    let report = taskpulse::stress::evaluate(&sample);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match report.severity {
            StressSeverity::Critical => println!("CRITICAL STRESS: {}/10", report.score),
            StressSeverity::High => println!("HIGH STRESS: {}/10", report.score),
            StressSeverity::Healthy => println!("HEALTHY: {}/10", report.score),
        }
    }

    Ok(())
}

fn cmd_monitor(flush: bool) -> Result<(), PulseCliError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let sample: StressSample = serde_json::from_str(trimmed)
            .map_err(|e| PulseCliError::ParseError(format!("Failed to parse sample: {}", e)))?;

        let report = taskpulse::stress::evaluate(&sample);
        writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
        if flush {
            stdout.flush()?;
        }
    }

    Ok(())
}

fn cmd_stats(
    dataset_path: &Path,
    team_path: Option<&Path>,
    input_format: InputFormat,
    bins: usize,
    json: bool,
) -> Result<(), PulseCliError> {
    let dataset = load_dataset(dataset_path, &input_format)?;

    let team_summary = match team_path {
        Some(path) => {
            let records: Vec<TeamRecord> = match input_format {
                InputFormat::Ndjson => dataset::parse_ndjson(&read_input(path)?)?,
                InputFormat::Json => dataset::parse_array(&read_input(path)?)?,
            };
            dataset::team_summary(&records)
        }
        None => None,
    };

    let report = StatsReport {
        total_tasks: dataset.len(),
        task_types: dataset.task_type_labels().len(),
        mean_estimated_duration: dataset.mean_estimated_duration(),
        priority_counts: dataset.priority_counts(),
        mean_duration_by_mood: dataset.mean_duration_by_mood(),
        workload_histogram: dataset.workload_histogram(bins),
        deadline_histogram: dataset.deadline_histogram(bins),
        team: team_summary,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Dataset Summary");
        println!("===============");
        println!("Total tasks:    {}", report.total_tasks);
        println!("Task types:     {}", report.task_types);
        println!("Avg duration:   {:.1} hrs", report.mean_estimated_duration);

        println!("\nTasks by priority:");
        for (label, count) in &report.priority_counts {
            println!("  {:<10} {}", label, count);
        }

        println!("\nAvg duration by mood:");
        for (label, mean) in &report.mean_duration_by_mood {
            println!("  {:<10} {:.1} hrs", label, mean);
        }

        if let Some(ref team) = report.team {
            println!("\nTeam Summary");
            println!("============");
            println!("Members:          {}", team.members);
            println!("Avg productivity: {:.1}%", team.avg_productivity);
            println!("Avg stress:       {:.1}/10", team.avg_stress_level);
            println!("Tasks completed:  {}", team.total_tasks_completed);
        }
    }

    Ok(())
}

fn cmd_doctor(
    dataset_path: Option<&Path>,
    model_path: Option<&Path>,
    recommendation_path: Option<&Path>,
    json: bool,
) -> Result<(), PulseCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "pulse_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Taskpulse version {}", PULSE_VERSION),
    });

    checks.push(DoctorCheck {
        name: "feature_arity".to_string(),
        status: CheckStatus::Ok,
        message: format!("Feature vector carries {} slots", FEATURE_COUNT),
    });

    if let Some(path) = dataset_path {
        checks.push(check_artifact(path, "dataset", |content| {
            let dataset = TaskDataset::parse_ndjson(content)?;
            Ok(format!(
                "Dataset valid ({} records, {} task types)",
                dataset.len(),
                dataset.task_type_labels().len()
            ))
        }));
    }

    if let Some(path) = model_path {
        checks.push(check_artifact(path, "duration_model", |content| {
            LinearDurationModel::from_json(content)?;
            Ok("Duration model artifact valid".to_string())
        }));
    }

    if let Some(path) = recommendation_path {
        checks.push(check_artifact(path, "recommendation_model", |content| {
            RecommendationModel::from_json(content)?;
            Ok("Recommendation model artifact valid".to_string())
        }));
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (monitor mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: PULSE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Pulse Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(PulseCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(path: &Path) -> Result<String, PulseCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn load_dataset(path: &Path, format: &InputFormat) -> Result<TaskDataset, PulseCliError> {
    let content = read_input(path)?;
    let dataset = match format {
        InputFormat::Ndjson => TaskDataset::parse_ndjson(&content)?,
        InputFormat::Json => TaskDataset::parse_array(&content)?,
    };
    Ok(dataset)
}

fn check_artifact<F>(path: &Path, name: &str, validate: F) -> DoctorCheck
where
    F: FnOnce(&str) -> Result<String, taskpulse::PipelineError>,
{
    if !path.exists() {
        return DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: format!("{} does not exist", path.display()),
        };
    }

    match fs::read_to_string(path) {
        Ok(content) => match validate(&content) {
            Ok(message) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Ok,
                message,
            },
            Err(e) => DoctorCheck {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        },
        Err(e) => DoctorCheck {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: format!("Cannot read {}: {}", path.display(), e),
        },
    }
}

// Error types

#[derive(Debug)]
enum PulseCliError {
    Io(io::Error),
    Pipeline(taskpulse::PipelineError),
    Json(serde_json::Error),
    ParseError(String),
    DoctorFailed,
}

impl From<io::Error> for PulseCliError {
    fn from(e: io::Error) -> Self {
        PulseCliError::Io(e)
    }
}

impl From<taskpulse::PipelineError> for PulseCliError {
    fn from(e: taskpulse::PipelineError) -> Self {
        PulseCliError::Pipeline(e)
    }
}

impl From<serde_json::Error> for PulseCliError {
    fn from(e: serde_json::Error) -> Self {
        PulseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<PulseCliError> for CliError {
    fn from(e: PulseCliError) -> Self {
        match e {
            PulseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PulseCliError::Pipeline(e) => CliError {
                code: "PIPELINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'pulse doctor' against the artifact paths".to_string()),
            },
            PulseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            PulseCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
            PulseCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct StatsReport {
    total_tasks: usize,
    task_types: usize,
    mean_estimated_duration: f64,
    priority_counts: Vec<(String, usize)>,
    mean_duration_by_mood: Vec<(String, f64)>,
    workload_histogram: Vec<dataset::HistogramBin>,
    deadline_histogram: Vec<dataset::HistogramBin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<dataset::TeamSummary>,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
