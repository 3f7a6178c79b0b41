use crate::config::ScoringConfig;
use crate::pipeline::traits::SimilarityMetric;

use super::ConsumedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CandidateSource {
    Window,
    ExactFallback,
}

impl CandidateSource {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::ExactFallback => "exact_fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Candidate {
    pub(super) index: usize,
    pub(super) score: f64,
    pub(super) source: CandidateSource,
}

/// Half-open range of spoken indices searched for one reference position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SearchWindow {
    pub(super) start: usize,
    pub(super) end: usize,
}

impl SearchWindow {
    pub(super) fn around(position: usize, spoken_len: usize, config: &ScoringConfig) -> Self {
        let start = position.saturating_sub(config.window_behind);
        let end = position.saturating_add(config.window_ahead).min(spoken_len);
        Self {
            start,
            end: end.max(start),
        }
    }

    pub(super) fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

pub(super) fn positional_factor(position: usize, index: usize, decay: f64) -> f64 {
    (1.0 - decay * position.abs_diff(index) as f64).max(0.0)
}

/// Highest position-adjusted candidate inside the window. Ties keep the
/// earliest spoken index.
pub(super) fn best_in_window(
    reference_word: &str,
    position: usize,
    spoken: &[String],
    consumed: &ConsumedSet,
    window: SearchWindow,
    similarity: &dyn SimilarityMetric,
    config: &ScoringConfig,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for index in window.start..window.end {
        if consumed.contains(index) {
            continue;
        }
        let score = similarity.similarity(reference_word, &spoken[index])
            * positional_factor(position, index, config.position_decay);
        let should_replace = match best {
            None => true,
            Some(current) => score > current.score,
        };
        if should_replace {
            best = Some(Candidate {
                index,
                score,
                source: CandidateSource::Window,
            });
        }
    }
    best
}

/// First unconsumed spoken token outside the window equal to the reference word.
pub(super) fn exact_outside_window(
    reference_word: &str,
    spoken: &[String],
    consumed: &ConsumedSet,
    window: SearchWindow,
) -> Option<Candidate> {
    spoken
        .iter()
        .enumerate()
        .find(|(index, word)| {
            !window.contains(*index) && !consumed.contains(*index) && word.as_str() == reference_word
        })
        .map(|(index, _)| Candidate {
            index,
            score: 1.0,
            source: CandidateSource::ExactFallback,
        })
}

/// Windowed search, then the exact-match fallback when the window result is weak.
///
/// The fallback wins over any windowed candidate below
/// `exact_fallback_below`, even one that would already classify as correct.
pub(super) fn select(
    reference_word: &str,
    position: usize,
    spoken: &[String],
    consumed: &ConsumedSet,
    similarity: &dyn SimilarityMetric,
    config: &ScoringConfig,
) -> Option<Candidate> {
    let window = SearchWindow::around(position, spoken.len(), config);
    let windowed = best_in_window(
        reference_word,
        position,
        spoken,
        consumed,
        window,
        similarity,
        config,
    );
    let windowed_score = windowed.map(|c| c.score).unwrap_or(0.0);
    if windowed_score >= config.exact_fallback_below {
        return windowed;
    }

    match exact_outside_window(reference_word, spoken, consumed, window) {
        Some(exact) => {
            tracing::debug!(
                word = reference_word,
                position,
                spoken_index = exact.index,
                windowed_score = format!("{windowed_score:.3}"),
                "matching: exact fallback overrides windowed candidate"
            );
            Some(exact)
        }
        None => windowed,
    }
}
