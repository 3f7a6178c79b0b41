use std::io::Write;

use reading_score_rs::{BatchReport, WordMatch, WordStatus};

pub fn write_text_report<W: Write>(out: &mut W, report: &BatchReport) -> Result<(), String> {
    for case in &report.cases {
        let words = case
            .result
            .word_results
            .iter()
            .map(render_word)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", case.id).map_err(write_error)?;
        writeln!(out, "  {words}").map_err(write_error)?;
        writeln!(out, "  {}", case.result.summary_line()).map_err(write_error)?;
    }

    let aggregates = &report.aggregates;
    writeln!(
        out,
        "{} cases, {} words: mean accuracy {:.1}%, pooled accuracy {:.1}%",
        report.meta.case_count,
        aggregates.total_reference_words,
        aggregates.mean_accuracy,
        aggregates.pooled_accuracy
    )
    .map_err(write_error)?;
    Ok(())
}

/// `word` for correct, `~word(spoken)` for near misses, `-word(not read)` for skips.
fn render_word(word: &WordMatch) -> String {
    match (word.status, word.hover_detail()) {
        (WordStatus::Correct, _) | (_, None) => word.original.clone(),
        (WordStatus::Incorrect, Some(detail)) => format!("~{}({detail})", word.original),
        (WordStatus::Missed, Some(detail)) => format!("-{}({detail})", word.original),
    }
}

fn write_error(err: std::io::Error) -> String {
    format!("Failed to write text report: {err}")
}
