use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::types::{ComparisonResult, WordMatch, WordStatus};

/// Hover text for a reference word the student never read.
pub const NOT_READ_MESSAGE: &str = "not read";
const WORST_CASES_TOP_N: usize = 10;

impl WordMatch {
    /// Detail shown on hover: the misheard word for near misses, a fixed
    /// message for missed words, nothing for correct ones.
    pub fn hover_detail(&self) -> Option<&str> {
        match self.status {
            WordStatus::Correct => None,
            WordStatus::Incorrect => Some(self.spoken.as_str()),
            WordStatus::Missed => Some(NOT_READ_MESSAGE),
        }
    }
}

impl ComparisonResult {
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            missed: self.missed_count,
            extra: self.extra_count,
            accuracy: self.accuracy,
        }
    }

    pub fn summary_line(&self) -> String {
        self.summary().to_string()
    }
}

/// The four counts plus accuracy, as shown under a scored passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub missed: usize,
    pub extra: usize,
    pub accuracy: u32,
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "correct: {} | incorrect: {} | missed: {} | extra: {} | accuracy: {}%",
            self.correct, self.incorrect, self.missed, self.extra, self.accuracy
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncorrectWord {
    pub expected: String,
    pub spoken: String,
}

/// What a practice session stores for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub missed: usize,
    pub total: usize,
    pub accuracy: u32,
    pub incorrect_words: Vec<IncorrectWord>,
    pub missed_words: Vec<String>,
    pub detected_text: String,
}

impl PracticeSummary {
    pub fn from_result(result: &ComparisonResult, detected_text: &str) -> Self {
        let mut incorrect_words = Vec::new();
        let mut missed_words = Vec::new();
        for word in &result.word_results {
            match word.status {
                WordStatus::Correct => {}
                WordStatus::Incorrect => incorrect_words.push(IncorrectWord {
                    expected: word.original.clone(),
                    spoken: word.spoken.clone(),
                }),
                WordStatus::Missed => missed_words.push(word.original.clone()),
            }
        }
        Self {
            correct: result.correct_count,
            incorrect: result.incorrect_count,
            missed: result.missed_count,
            total: result.reference_tokens.len(),
            accuracy: result.accuracy,
            incorrect_words,
            missed_words,
            detected_text: detected_text.trim().to_string(),
        }
    }
}

/// Accuracy trend across chronological attempts at one passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptProgress {
    pub attempts: usize,
    pub first_accuracy: u32,
    pub last_accuracy: u32,
    pub best_accuracy: u32,
    /// `last - first`; negative when the student got worse.
    pub improvement: i64,
}

impl AttemptProgress {
    pub fn from_accuracies(accuracies: &[u32]) -> Option<Self> {
        let first = *accuracies.first()?;
        let last = *accuracies.last()?;
        let best = accuracies.iter().copied().max()?;
        Some(Self {
            attempts: accuracies.len(),
            first_accuracy: first,
            last_accuracy: last,
            best_accuracy: best,
            improvement: i64::from(last) - i64::from(first),
        })
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute rounded to two decimals; 0 for a non-positive duration.
pub fn reading_speed_wpm(word_count: usize, seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    let wpm = word_count as f64 / (seconds / 60.0);
    (wpm * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

impl BatchReport {
    /// Writes the report as pretty JSON, creating parent directories as needed.
    pub fn write_json(&self, path: &Path) -> Result<(), ScoringError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| ScoringError::io("creating report directory", err))?;
        }
        let file =
            fs::File::create(path).map_err(|err| ScoringError::io("creating report file", err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|err| ScoringError::json("serializing batch report", err))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|err| ScoringError::io("writing report file", err))?;
        tracing::debug!(
            path = %path.display(),
            case_count = self.meta.case_count,
            "report: wrote batch report"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub correct_threshold: f64,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub summary: PracticeSummary,
    pub result: ComparisonResult,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    pub total_reference_words: usize,
    pub total_correct: usize,
    pub total_incorrect: usize,
    pub total_missed: usize,
    pub total_extra: usize,
    /// Mean of per-case accuracy.
    pub mean_accuracy: f64,
    /// Correct words over all reference words, as a percentage.
    pub pooled_accuracy: f64,
    pub min_accuracy: Option<u32>,
    pub max_accuracy: Option<u32>,
    pub worst_cases: Vec<OutlierEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierEntry {
    pub id: String,
    pub accuracy: u32,
}

pub fn build_case_report(id: &str, result: ComparisonResult, detected_text: &str) -> CaseReport {
    CaseReport {
        id: id.to_string(),
        summary: PracticeSummary::from_result(&result, detected_text),
        result,
    }
}

pub fn aggregate_cases(cases: &[CaseReport]) -> AggregateReport {
    if cases.is_empty() {
        return AggregateReport::default();
    }

    let mut aggregate = AggregateReport::default();
    let mut accuracy_sum = 0u64;
    for case in cases {
        let result = &case.result;
        aggregate.total_reference_words += result.reference_tokens.len();
        aggregate.total_correct += result.correct_count;
        aggregate.total_incorrect += result.incorrect_count;
        aggregate.total_missed += result.missed_count;
        aggregate.total_extra += result.extra_count;
        accuracy_sum += u64::from(result.accuracy);
    }
    aggregate.mean_accuracy = accuracy_sum as f64 / cases.len() as f64;
    aggregate.pooled_accuracy = if aggregate.total_reference_words == 0 {
        0.0
    } else {
        100.0 * aggregate.total_correct as f64 / aggregate.total_reference_words as f64
    };
    aggregate.min_accuracy = cases.iter().map(|c| c.result.accuracy).min();
    aggregate.max_accuracy = cases.iter().map(|c| c.result.accuracy).max();

    let mut ranked = cases
        .iter()
        .map(|c| OutlierEntry {
            id: c.id.clone(),
            accuracy: c.result.accuracy,
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| match a.accuracy.cmp(&b.accuracy) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
    ranked.truncate(WORST_CASES_TOP_N);
    aggregate.worst_cases = ranked;
    aggregate
}
