use super::candidate_selector::{
    best_in_window, exact_outside_window, positional_factor, select, CandidateSource,
    SearchWindow,
};
use super::{accuracy_percent, classify, compare, compare_with, ConsumedSet};
use crate::config::ScoringConfig;
use crate::pipeline::traits::SimilarityMetric;
use crate::types::WordStatus;

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Scores identical words 1.0 and everything else with a fixed value.
struct FixedSimilarity(f64);

impl SimilarityMetric for FixedSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            1.0
        } else {
            self.0
        }
    }
}

#[test]
fn window_is_clamped_to_spoken_bounds() {
    let config = ScoringConfig::default();
    assert_eq!(
        SearchWindow::around(0, 30, &config),
        SearchWindow { start: 0, end: 10 }
    );
    assert_eq!(
        SearchWindow::around(7, 30, &config),
        SearchWindow { start: 2, end: 17 }
    );
    assert_eq!(
        SearchWindow::around(7, 12, &config),
        SearchWindow { start: 2, end: 12 }
    );
    // Reference far past the end of a short transcript.
    let window = SearchWindow::around(40, 3, &config);
    assert_eq!(window.start, 35);
    assert!(window.end <= window.start);
    assert!(!window.contains(1));
}

#[test]
fn positional_factor_decays_with_distance() {
    assert_eq!(positional_factor(4, 4, 0.02), 1.0);
    assert!((positional_factor(4, 7, 0.02) - 0.94).abs() < 1e-12);
    assert!((positional_factor(4, 1, 0.02) - 0.94).abs() < 1e-12);
    assert_eq!(positional_factor(0, 100, 0.02), 0.0);
}

#[test]
fn best_in_window_prefers_nearest_on_tie() {
    let spoken = words("bir bir bir");
    let consumed = ConsumedSet::new(spoken.len());
    let config = ScoringConfig::default();
    let window = SearchWindow::around(1, spoken.len(), &config);
    let best = best_in_window(
        "bir",
        1,
        &spoken,
        &consumed,
        window,
        &FixedSimilarity(0.0),
        &config,
    )
    .expect("candidate");
    assert_eq!(best.index, 1);
    assert_eq!(best.score, 1.0);
    assert_eq!(best.source, CandidateSource::Window);
}

#[test]
fn best_in_window_keeps_earliest_index_on_equal_scores() {
    // Indices 0 and 2 are both one step from position 1.
    let spoken = words("bir iki bir");
    let mut consumed = ConsumedSet::new(spoken.len());
    consumed.consume(1);
    let config = ScoringConfig::default();
    let window = SearchWindow::around(1, spoken.len(), &config);
    let best = best_in_window(
        "bir",
        1,
        &spoken,
        &consumed,
        window,
        &FixedSimilarity(0.0),
        &config,
    )
    .expect("candidate");
    assert_eq!(best.index, 0);
}

#[test]
fn best_in_window_skips_consumed_indices() {
    let spoken = words("kedi");
    let mut consumed = ConsumedSet::new(spoken.len());
    consumed.consume(0);
    let config = ScoringConfig::default();
    let window = SearchWindow::around(0, spoken.len(), &config);
    assert!(best_in_window(
        "kedi",
        0,
        &spoken,
        &consumed,
        window,
        &FixedSimilarity(0.0),
        &config
    )
    .is_none());
}

#[test]
fn exact_outside_window_ignores_window_and_consumed() {
    let spoken = words("a b c d e f g h i j k kedi l kedi");
    let config = ScoringConfig::default();
    let window = SearchWindow::around(0, spoken.len(), &config);
    let mut consumed = ConsumedSet::new(spoken.len());

    let first = exact_outside_window("kedi", &spoken, &consumed, window).expect("exact");
    assert_eq!(first.index, 11);
    assert_eq!(first.score, 1.0);
    assert_eq!(first.source, CandidateSource::ExactFallback);

    consumed.consume(11);
    let second = exact_outside_window("kedi", &spoken, &consumed, window).expect("exact");
    assert_eq!(second.index, 13);

    assert!(exact_outside_window("a", &spoken, &consumed, window).is_none());
}

#[test]
fn fallback_overrides_correct_level_fuzzy_match() {
    // "okul" scores 0.8 at the expected position: correct, but below 0.9.
    let spoken = words("okul a b c d e f g h i j okula");
    let consumed = ConsumedSet::new(spoken.len());
    let config = ScoringConfig::default();
    let chosen = select(
        "okula",
        0,
        &spoken,
        &consumed,
        &crate::pipeline::defaults::EditDistanceSimilarity,
        &config,
    )
    .expect("candidate");
    assert_eq!(chosen.index, 11);
    assert_eq!(chosen.source, CandidateSource::ExactFallback);

    let result = compare(&words("okula"), &spoken, 0.70);
    assert_eq!(result.word_results[0].spoken, "okula");
    assert_eq!(result.word_results[0].similarity, 1.0);
    assert_eq!(result.word_results[0].status, WordStatus::Correct);
    assert_eq!(result.extra_count, 11);
}

#[test]
fn fallback_not_used_when_window_is_strong() {
    let spoken = words("kedi a b c d e f g h i j kedi");
    let result = compare(&words("kedi"), &spoken, 0.70);
    assert_eq!(result.word_results[0].status, WordStatus::Correct);
    assert_eq!(result.word_results[0].similarity, 1.0);
    // Index 11 stays unconsumed.
    assert_eq!(result.extra_count, 11);
}

#[test]
fn threshold_boundary_is_inclusive() {
    let reference = words("kelime");
    let spoken = words("kelim");
    let config = ScoringConfig::default();

    let at = compare_with(&reference, &spoken, &FixedSimilarity(0.70), &config);
    assert_eq!(at.word_results[0].status, WordStatus::Correct);

    let below = compare_with(
        &reference,
        &spoken,
        &FixedSimilarity(0.70 - 1e-12),
        &config,
    );
    assert_eq!(below.word_results[0].status, WordStatus::Incorrect);
    assert_eq!(below.word_results[0].spoken, "kelim");
    assert_eq!(below.extra_count, 0);

    let near_miss_floor = compare_with(&reference, &spoken, &FixedSimilarity(0.50), &config);
    assert_eq!(near_miss_floor.word_results[0].status, WordStatus::Incorrect);

    let too_weak = compare_with(
        &reference,
        &spoken,
        &FixedSimilarity(0.50 - 1e-12),
        &config,
    );
    assert_eq!(too_weak.word_results[0].status, WordStatus::Missed);
    assert_eq!(too_weak.word_results[0].spoken, "");
    assert_eq!(too_weak.word_results[0].similarity, 0.0);
    assert_eq!(too_weak.extra_count, 1);
}

#[test]
fn edit_distance_score_at_threshold_counts_as_correct() {
    // Three substitutions over ten characters score exactly 0.7.
    let result = compare(&words("abcdefghij"), &words("abcdefgxyz"), 0.70);
    assert_eq!(result.word_results[0].status, WordStatus::Correct);
    assert_eq!(result.word_results[0].similarity, 0.7);
    assert_eq!(result.word_results[0].spoken, "abcdefgxyz");
    assert_eq!(result.accuracy, 100);

    // One more substitution drops it to a near miss.
    let weaker = compare(&words("abcdefghij"), &words("abcdefwxyz"), 0.70);
    assert_eq!(weaker.word_results[0].status, WordStatus::Incorrect);
    assert_eq!(weaker.accuracy, 0);
}

#[test]
fn classify_follows_configured_thresholds() {
    let config = ScoringConfig::default();
    assert_eq!(classify(1.0, &config), WordStatus::Correct);
    assert_eq!(classify(0.7, &config), WordStatus::Correct);
    assert_eq!(classify(0.69, &config), WordStatus::Incorrect);
    assert_eq!(classify(0.5, &config), WordStatus::Incorrect);
    assert_eq!(classify(0.49, &config), WordStatus::Missed);

    let strict = ScoringConfig::default().with_correct_threshold(0.95);
    assert_eq!(classify(0.9, &strict), WordStatus::Incorrect);
}

#[test]
fn near_miss_is_incorrect_and_consumes() {
    let result = compare(&words("kitap okudum"), &words("kitabı okudum"), 0.70);
    assert_eq!(result.word_results[0].status, WordStatus::Incorrect);
    assert_eq!(result.word_results[0].spoken, "kitabı");
    assert!((result.word_results[0].similarity - 4.0 / 6.0).abs() < 1e-12);
    assert_eq!(result.word_results[1].status, WordStatus::Correct);
    assert_eq!(result.incorrect_count, 1);
    assert_eq!(result.extra_count, 0);
    assert_eq!(result.accuracy, 50);
}

#[test]
fn skipped_word_is_missed_and_later_words_recover() {
    let result = compare(
        &words("kedi köpek kuş balık"),
        &words("kedi kuş balık"),
        0.70,
    );
    let statuses: Vec<_> = result.word_results.iter().map(|w| w.status).collect();
    assert_eq!(
        statuses,
        [
            WordStatus::Correct,
            WordStatus::Missed,
            WordStatus::Correct,
            WordStatus::Correct
        ]
    );
    assert!((result.word_results[2].similarity - 0.98).abs() < 1e-12);
    assert_eq!(result.accuracy, 75);
    assert_eq!(result.extra_count, 0);
}

#[test]
fn greedy_pass_can_misassign_locally() {
    // "sat" was skipped; it grabs "mat" as a near miss, leaving the real
    // "mat" reference word without a candidate.
    let result = compare(
        &words("the cat sat on the mat"),
        &words("the cat on the mat"),
        0.70,
    );
    let statuses: Vec<_> = result.word_results.iter().map(|w| w.status).collect();
    assert_eq!(
        statuses,
        [
            WordStatus::Correct,
            WordStatus::Correct,
            WordStatus::Incorrect,
            WordStatus::Correct,
            WordStatus::Correct,
            WordStatus::Missed
        ]
    );
    assert_eq!(result.word_results[2].spoken, "mat");
    assert_eq!(result.accuracy, 67);
    assert_eq!(result.extra_count, 0);
}

#[test]
fn zero_width_window_relies_on_fallback() {
    let config = ScoringConfig {
        window_behind: 0,
        window_ahead: 0,
        ..ScoringConfig::default()
    };
    let result = compare_with(
        &words("bir iki"),
        &words("iki bir"),
        &crate::pipeline::defaults::EditDistanceSimilarity,
        &config,
    );
    assert_eq!(result.correct_count, 2);
    assert_eq!(result.word_results[0].spoken, "bir");
    assert_eq!(result.word_results[1].spoken, "iki");
}

#[test]
fn accuracy_rounds_half_up() {
    assert_eq!(accuracy_percent(0, 0), 0);
    assert_eq!(accuracy_percent(0, 5), 0);
    assert_eq!(accuracy_percent(1, 2), 50);
    assert_eq!(accuracy_percent(1, 3), 33);
    assert_eq!(accuracy_percent(2, 3), 67);
    assert_eq!(accuracy_percent(1, 8), 13);
    assert_eq!(accuracy_percent(7, 7), 100);
}

#[test]
fn consumed_set_counts_each_index_once() {
    let mut consumed = ConsumedSet::new(3);
    consumed.consume(1);
    consumed.consume(1);
    consumed.consume(7);
    assert_eq!(consumed.len(), 1);
    assert!(consumed.contains(1));
    assert!(!consumed.contains(0));
    assert!(!consumed.contains(7));
}
