pub mod matching;
pub mod report;
pub mod similarity;
pub mod tokenization;
