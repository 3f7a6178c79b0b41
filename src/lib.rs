pub mod alignment;
pub mod capture;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::matching::{accuracy_percent, compare, MatchOutcome};
pub use alignment::report::{
    aggregate_cases, build_case_report, count_words, reading_speed_wpm, AggregateReport,
    AttemptProgress, BatchReport, CaseReport, ComparisonSummary, IncorrectWord, Meta,
    OutlierEntry, PracticeSummary, NOT_READ_MESSAGE,
};
pub use alignment::similarity::{edit_distance, similarity};
pub use alignment::tokenization::{normalize, tokenize};
pub use capture::{CaptureEvent, CaptureFailure, FinalTranscript, TranscriptCapture};
pub use config::ScoringConfig;
pub use error::ScoringError;
pub use pipeline::builder::ReadingScorerBuilder;
pub use pipeline::runtime::{compare_texts, ReadingScorer};
pub use pipeline::traits::{SimilarityMetric, Tokenizer, WordMatcher};
pub use types::{ComparisonResult, WordMatch, WordStatus};
