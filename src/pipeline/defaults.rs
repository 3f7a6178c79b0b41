use crate::alignment::matching::{match_words, MatchOutcome};
use crate::alignment::similarity::similarity;
use crate::alignment::tokenization::tokenize;
use crate::config::ScoringConfig;
use crate::pipeline::traits::{SimilarityMetric, Tokenizer, WordMatcher};

pub struct PunctuationTokenizer;

impl Tokenizer for PunctuationTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

pub struct EditDistanceSimilarity;

impl SimilarityMetric for EditDistanceSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        similarity(a, b)
    }
}

pub struct WindowedGreedyMatcher;

impl WordMatcher for WindowedGreedyMatcher {
    fn match_words(
        &self,
        reference: &[String],
        spoken: &[String],
        similarity: &dyn SimilarityMetric,
        config: &ScoringConfig,
    ) -> MatchOutcome {
        match_words(reference, spoken, similarity, config)
    }
}
