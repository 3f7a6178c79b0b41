use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::defaults::{EditDistanceSimilarity, PunctuationTokenizer, WindowedGreedyMatcher};
use crate::pipeline::runtime::{ReadingScorer, ReadingScorerParts};
use crate::pipeline::traits::{SimilarityMetric, Tokenizer, WordMatcher};

pub struct ReadingScorerBuilder {
    config: ScoringConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    similarity: Option<Box<dyn SimilarityMetric>>,
    matcher: Option<Box<dyn WordMatcher>>,
}

impl ReadingScorerBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            similarity: None,
            matcher: None,
        }
    }

    pub fn with_correct_threshold(mut self, correct_threshold: f64) -> Self {
        self.config.correct_threshold = correct_threshold;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_similarity(mut self, similarity: Box<dyn SimilarityMetric>) -> Self {
        self.similarity = Some(similarity);
        self
    }

    pub fn with_matcher(mut self, matcher: Box<dyn WordMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn build(self) -> Result<ReadingScorer, ScoringError> {
        self.config.validate()?;

        if self.config.window_behind == 0 && self.config.window_ahead == 0 {
            tracing::warn!(
                "scoring window is empty; only exact matches found by the fallback scan will count"
            );
        }
        if self.config.exact_fallback_below < self.config.correct_threshold {
            tracing::warn!(
                exact_fallback_below = self.config.exact_fallback_below,
                correct_threshold = self.config.correct_threshold,
                "exact-match fallback triggers below the correct threshold; weak windowed matches may be kept"
            );
        }

        Ok(ReadingScorer::from_parts(ReadingScorerParts {
            config: self.config,
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(PunctuationTokenizer)),
            similarity: self
                .similarity
                .unwrap_or_else(|| Box::new(EditDistanceSimilarity)),
            matcher: self
                .matcher
                .unwrap_or_else(|| Box::new(WindowedGreedyMatcher)),
        }))
    }
}

impl Default for ReadingScorerBuilder {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
