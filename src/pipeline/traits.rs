use crate::alignment::matching::MatchOutcome;
use crate::config::ScoringConfig;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word-to-word similarity in [0, 1]; the only fuzziness the matcher sees.
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

pub trait WordMatcher: Send + Sync {
    fn match_words(
        &self,
        reference: &[String],
        spoken: &[String],
        similarity: &dyn SimilarityMetric,
        config: &ScoringConfig,
    ) -> MatchOutcome;
}
