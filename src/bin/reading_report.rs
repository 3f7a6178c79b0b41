use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use reading_score_rs::{
    aggregate_cases, build_case_report, BatchReport, CaseReport, Meta, ReadingScorer,
    ReadingScorerBuilder, ScoringConfig,
};
use serde::Deserialize;

#[path = "reading_report/text_report_formatter.rs"]
mod text_report_formatter;

const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    /// Word-by-word feedback and a summary line per case, printed to stdout.
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "reading_report")]
#[command(about = "Score read-aloud transcripts against their reference passages")]
struct Args {
    #[arg(
        long,
        env = "READING_REPORT_CASES",
        default_value = "test-data/scoring_cases.json"
    )]
    cases: PathBuf,
    #[arg(long, env = "READING_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "READING_REPORT_THRESHOLD")]
    threshold: Option<f64>,
    #[arg(long, env = "READING_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(
        long,
        env = "READING_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
    #[arg(long, env = "READING_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "READING_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct Case {
    id: String,
    reference: String,
    spoken: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("reading_report: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let cases_path = resolve_path(&repo_root, &args.cases);
    let mut cases = load_cases(&cases_path)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let scorer = build_scorer(&repo_root, args.config.as_ref(), args.threshold)?;
    tracing::info!(
        case_count = cases.len(),
        correct_threshold = scorer.config().correct_threshold,
        "reading_report: scoring cases"
    );

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    if args.output_format == OutputFormat::Text {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let mut case_reports: Vec<CaseReport> = Vec::with_capacity(cases.len());
    for case in &cases {
        progress.set_message(case.id.clone());
        let result = scorer.compare(&case.reference, &case.spoken);
        case_reports.push(build_case_report(&case.id, result, &case.spoken));
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let aggregates = aggregate_cases(&case_reports);
    let report = BatchReport {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            correct_threshold: scorer.config().correct_threshold,
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };

    match args.output_format {
        OutputFormat::Json => {
            let out_path = resolve_out_path(&repo_root, args.out.as_ref());
            report
                .write_json(&out_path)
                .map_err(|err| format!("Failed to write report '{}': {err}", out_path.display()))?;
            println!("Wrote report for {} cases to {}", report.meta.case_count, out_path.display());
        }
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            text_report_formatter::write_text_report(&mut handle, &report)?;
        }
    }
    Ok(())
}

fn build_scorer(
    repo_root: &Path,
    config_path: Option<&PathBuf>,
    threshold: Option<f64>,
) -> Result<ReadingScorer, String> {
    let config = match config_path {
        Some(path) => {
            let path = resolve_path(repo_root, path);
            ScoringConfig::load(&path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
        }
        None => ScoringConfig::default(),
    };
    let mut builder = ReadingScorerBuilder::new(config);
    if let Some(threshold) = threshold {
        builder = builder.with_correct_threshold(threshold);
    }
    builder
        .build()
        .map_err(|err| format!("Failed to build scorer: {err}"))
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>) -> PathBuf {
    match out {
        Some(path) => resolve_path(repo_root, path),
        None => repo_root.join("reports").join("reading_report.json"),
    }
}
