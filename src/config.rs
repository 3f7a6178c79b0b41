use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Tunable policy for the windowed greedy matcher.
///
/// The defaults reproduce the reading-practice scoring policy: a spoken word
/// counts as correct from 0.70 similarity, as a near miss from 0.50, and is
/// searched for from five positions behind to ten positions ahead of where it
/// was expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum score (inclusive) for a `correct` classification.
    pub correct_threshold: f64,
    /// Minimum score (inclusive) for an `incorrect` classification.
    pub incorrect_threshold: f64,
    /// How many spoken positions before the expected index are searched.
    pub window_behind: usize,
    /// Exclusive upper bound of the search window, relative to the expected index.
    pub window_ahead: usize,
    /// Score penalty per index of distance from the expected position.
    pub position_decay: f64,
    /// Below this windowed score the whole transcript is scanned for an exact match.
    pub exact_fallback_below: f64,
}

impl ScoringConfig {
    pub const DEFAULT_CORRECT_THRESHOLD: f64 = 0.70;
    pub const DEFAULT_INCORRECT_THRESHOLD: f64 = 0.50;
    pub const DEFAULT_WINDOW_BEHIND: usize = 5;
    pub const DEFAULT_WINDOW_AHEAD: usize = 10;
    pub const DEFAULT_POSITION_DECAY: f64 = 0.02;
    pub const DEFAULT_EXACT_FALLBACK_BELOW: f64 = 0.9;

    pub fn with_correct_threshold(mut self, correct_threshold: f64) -> Self {
        self.correct_threshold = correct_threshold;
        self
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| ScoringError::json("parse scoring config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let thresholds = [
            ("correct_threshold", self.correct_threshold),
            ("incorrect_threshold", self.incorrect_threshold),
            ("exact_fallback_below", self.exact_fallback_below),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ScoringError::invalid_config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.incorrect_threshold > self.correct_threshold {
            return Err(ScoringError::invalid_config(format!(
                "incorrect_threshold ({}) must not exceed correct_threshold ({})",
                self.incorrect_threshold, self.correct_threshold
            )));
        }
        if !self.position_decay.is_finite() || self.position_decay < 0.0 {
            return Err(ScoringError::invalid_config(format!(
                "position_decay must be a non-negative number, got {}",
                self.position_decay
            )));
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            correct_threshold: Self::DEFAULT_CORRECT_THRESHOLD,
            incorrect_threshold: Self::DEFAULT_INCORRECT_THRESHOLD,
            window_behind: Self::DEFAULT_WINDOW_BEHIND,
            window_ahead: Self::DEFAULT_WINDOW_AHEAD,
            position_decay: Self::DEFAULT_POSITION_DECAY,
            exact_fallback_below: Self::DEFAULT_EXACT_FALLBACK_BELOW,
        }
    }
}
