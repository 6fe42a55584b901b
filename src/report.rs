use itertools::Itertools;
use std::fmt::Write;
use std::time::Duration;

use crate::{progress::ProgressSeries, scorer::AnalysisResult};

/// Plain-text rendering of a result for non-interactive runs
pub fn text_report(result: &AnalysisResult, elapsed: Duration, progress: &ProgressSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Phrase:        \"{}\"", result.phrase);
    let _ = writeln!(out, "Recognized:    \"{}\"", result.recognized_text);
    let _ = writeln!(out, "Score:         {}%", result.score);
    let _ = writeln!(out, "Correct words: {}", result.correct_words());
    let _ = writeln!(out, "Difficulty:    {}", result.difficulty);
    let _ = writeln!(out, "Analysis time: {:.1} s", elapsed.as_secs_f64());
    let _ = writeln!(out, "Feedback:      {}", result.feedback.message());
    let _ = writeln!(out);

    for o in &result.outcomes {
        if o.correct {
            let _ = writeln!(out, "  ✓ {} - Correct", o.target);
        } else {
            let _ = writeln!(out, "  ✗ {} -> {} - Needs practice", o.target, o.recognized);
        }
    }

    let to_practice = result.mistakes().map(|o| o.target.as_str()).join(", ");
    if !to_practice.is_empty() {
        let _ = writeln!(out, "Words to practice: {to_practice}");
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Progress (simulated): {}",
        progress
            .points
            .iter()
            .map(|p| format!("{} {}", p.label, p.score))
            .join(", ")
    );
    if let Some(summary) = progress_summary(progress) {
        let _ = writeln!(out, "                      {summary}");
    }
    out
}

/// e.g. `"average 75.6, best 88"`
pub fn progress_summary(progress: &ProgressSeries) -> Option<String> {
    let average = progress.average()?;
    let best = progress.best()?;
    Some(format!("average {average:.1}, best {best}"))
}
