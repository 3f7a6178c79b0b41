use crate::alignment::matching::summarize;
use crate::capture::TranscriptCapture;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::defaults::{EditDistanceSimilarity, PunctuationTokenizer, WindowedGreedyMatcher};
use crate::pipeline::traits::{SimilarityMetric, Tokenizer, WordMatcher};
use crate::types::ComparisonResult;

/// Scores a read-aloud transcript against its reference passage.
///
/// Holds no per-call state, so one scorer can serve many sessions at once.
pub struct ReadingScorer {
    config: ScoringConfig,
    tokenizer: Box<dyn Tokenizer>,
    similarity: Box<dyn SimilarityMetric>,
    matcher: Box<dyn WordMatcher>,
}

pub(crate) struct ReadingScorerParts {
    pub config: ScoringConfig,
    pub tokenizer: Box<dyn Tokenizer>,
    pub similarity: Box<dyn SimilarityMetric>,
    pub matcher: Box<dyn WordMatcher>,
}

impl ReadingScorer {
    pub(crate) fn from_parts(parts: ReadingScorerParts) -> Self {
        Self {
            config: parts.config,
            tokenizer: parts.tokenizer,
            similarity: parts.similarity,
            matcher: parts.matcher,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn compare(&self, reference_text: &str, spoken_text: &str) -> ComparisonResult {
        let reference = self.tokenizer.tokenize(reference_text);
        let spoken = self.tokenizer.tokenize(spoken_text);
        self.compare_tokens(&reference, &spoken)
    }

    pub fn compare_tokens(&self, reference: &[String], spoken: &[String]) -> ComparisonResult {
        let outcome =
            self.matcher
                .match_words(reference, spoken, self.similarity.as_ref(), &self.config);
        summarize(reference, spoken, outcome)
    }

    /// Compares against a finished capture. A failed or still-running capture
    /// is an error and nothing is compared.
    pub fn score_capture(
        &self,
        reference_text: &str,
        capture: TranscriptCapture,
    ) -> Result<ComparisonResult, ScoringError> {
        let transcript = capture.finish()?;
        Ok(self.compare(reference_text, transcript.as_str()))
    }
}

impl Default for ReadingScorer {
    fn default() -> Self {
        Self::from_parts(ReadingScorerParts {
            config: ScoringConfig::default(),
            tokenizer: Box::new(PunctuationTokenizer),
            similarity: Box::new(EditDistanceSimilarity),
            matcher: Box::new(WindowedGreedyMatcher),
        })
    }
}

/// One-shot comparison of two raw texts with the default pipeline.
pub fn compare_texts(
    reference_text: &str,
    spoken_text: &str,
    correct_threshold: f64,
) -> ComparisonResult {
    let scorer = ReadingScorer::from_parts(ReadingScorerParts {
        config: ScoringConfig::default().with_correct_threshold(correct_threshold),
        tokenizer: Box::new(PunctuationTokenizer),
        similarity: Box::new(EditDistanceSimilarity),
        matcher: Box::new(WindowedGreedyMatcher),
    });
    scorer.compare(reference_text, spoken_text)
}
