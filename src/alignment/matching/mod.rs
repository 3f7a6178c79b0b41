use crate::config::ScoringConfig;
use crate::pipeline::defaults::EditDistanceSimilarity;
use crate::pipeline::traits::SimilarityMetric;
use crate::types::{ComparisonResult, WordMatch, WordStatus};

mod candidate_selector;
#[cfg(test)]
mod tests;

/// Spoken indices already claimed during one alignment run.
#[derive(Debug, Clone)]
pub(crate) struct ConsumedSet {
    flags: Vec<bool>,
    count: usize,
}

impl ConsumedSet {
    pub(crate) fn new(spoken_len: usize) -> Self {
        Self {
            flags: vec![false; spoken_len],
            count: 0,
        }
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn consume(&mut self, index: usize) {
        if let Some(flag) = self.flags.get_mut(index) {
            if !*flag {
                *flag = true;
                self.count += 1;
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }
}

/// Per-word records plus how many spoken tokens they claimed.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub word_results: Vec<WordMatch>,
    pub consumed_count: usize,
}

/// Aligns `reference` against `spoken` with the default metric and policy,
/// overriding only the correct threshold.
pub fn compare(reference: &[String], spoken: &[String], correct_threshold: f64) -> ComparisonResult {
    let config = ScoringConfig::default().with_correct_threshold(correct_threshold);
    compare_with(reference, spoken, &EditDistanceSimilarity, &config)
}

pub fn compare_with(
    reference: &[String],
    spoken: &[String],
    similarity: &dyn SimilarityMetric,
    config: &ScoringConfig,
) -> ComparisonResult {
    let outcome = match_words(reference, spoken, similarity, config);
    summarize(reference, spoken, outcome)
}

/// Greedy, position-aware pass over the reference words in order.
pub fn match_words(
    reference: &[String],
    spoken: &[String],
    similarity: &dyn SimilarityMetric,
    config: &ScoringConfig,
) -> MatchOutcome {
    let mut consumed = ConsumedSet::new(spoken.len());
    let mut word_results = Vec::with_capacity(reference.len());

    for (position, reference_word) in reference.iter().enumerate() {
        let candidate = candidate_selector::select(
            reference_word,
            position,
            spoken,
            &consumed,
            similarity,
            config,
        );

        let record = match candidate {
            Some(candidate) => match classify(candidate.score, config) {
                WordStatus::Missed => WordMatch::missed(reference_word),
                status => {
                    consumed.consume(candidate.index);
                    tracing::debug!(
                        word = reference_word.as_str(),
                        position,
                        spoken_index = candidate.index,
                        source = candidate.source.as_str(),
                        score = format!("{:.3}", candidate.score),
                        status = status.as_str(),
                        "matching: classified word"
                    );
                    WordMatch {
                        original: reference_word.clone(),
                        spoken: spoken[candidate.index].clone(),
                        status,
                        similarity: candidate.score,
                    }
                }
            },
            None => WordMatch::missed(reference_word),
        };
        if record.status == WordStatus::Missed {
            tracing::debug!(
                word = reference_word.as_str(),
                position,
                "matching: no usable candidate, word missed"
            );
        }
        word_results.push(record);
    }

    MatchOutcome {
        word_results,
        consumed_count: consumed.len(),
    }
}

/// Threshold policy: `>= correct` is correct, `>= incorrect` a near miss.
pub fn classify(score: f64, config: &ScoringConfig) -> WordStatus {
    if score >= config.correct_threshold {
        WordStatus::Correct
    } else if score >= config.incorrect_threshold {
        WordStatus::Incorrect
    } else {
        WordStatus::Missed
    }
}

/// `round(100 * correct / total)` with halves rounded up; 0 when `total` is 0.
pub fn accuracy_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    ((200 * correct + total) / (2 * total)) as u32
}

pub(crate) fn summarize(
    reference: &[String],
    spoken: &[String],
    outcome: MatchOutcome,
) -> ComparisonResult {
    let mut correct_count = 0usize;
    let mut incorrect_count = 0usize;
    let mut missed_count = 0usize;
    for record in &outcome.word_results {
        match record.status {
            WordStatus::Correct => correct_count += 1,
            WordStatus::Incorrect => incorrect_count += 1,
            WordStatus::Missed => missed_count += 1,
        }
    }
    let extra_count = spoken.len().saturating_sub(outcome.consumed_count);
    let accuracy = accuracy_percent(correct_count, reference.len());

    tracing::debug!(
        reference_len = reference.len(),
        spoken_len = spoken.len(),
        correct_count,
        incorrect_count,
        missed_count,
        extra_count,
        accuracy,
        "matching: comparison finished"
    );

    ComparisonResult {
        reference_tokens: reference.to_vec(),
        spoken_tokens: spoken.to_vec(),
        word_results: outcome.word_results,
        correct_count,
        incorrect_count,
        missed_count,
        extra_count,
        accuracy,
    }
}
