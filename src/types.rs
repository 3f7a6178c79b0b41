use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Correct,
    Incorrect,
    Missed,
}

impl WordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Missed => "missed",
        }
    }
}

/// Outcome for a single reference word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    pub original: String,
    /// Spoken token consumed by this word; empty when `status` is `Missed`.
    pub spoken: String,
    pub status: WordStatus,
    /// Winning position-adjusted score in [0, 1]; 0 for missed words.
    pub similarity: f64,
}

impl WordMatch {
    pub(crate) fn missed(original: &str) -> Self {
        Self {
            original: original.to_string(),
            spoken: String::new(),
            status: WordStatus::Missed,
            similarity: 0.0,
        }
    }
}

/// Full result of one alignment run.
///
/// `word_results` always holds exactly one entry per reference token, in
/// reference order, and `correct_count + incorrect_count + missed_count`
/// equals `reference_tokens.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub reference_tokens: Vec<String>,
    pub spoken_tokens: Vec<String>,
    pub word_results: Vec<WordMatch>,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub missed_count: usize,
    /// Spoken tokens never consumed by any reference word.
    pub extra_count: usize,
    /// Rounded percentage of reference words read correctly, 0–100.
    pub accuracy: u32,
}
