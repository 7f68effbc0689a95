use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use speakscore_assess::{AssessmentScores, ErrorType};

/// Print a JSON output structure to stdout.
pub(crate) fn print_json<T: Serialize>(output: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

/// Print the five headline scores and the per-word breakdown.
pub(crate) fn print_scores(scores: &AssessmentScores) {
    println!("{}", "Scores:".cyan().bold());
    print_score("Pronunciation", Some(scores.pronunciation_score));
    print_score("Accuracy", Some(scores.accuracy_score));
    print_score("Fluency", Some(scores.fluency_score));
    print_score("Completeness", Some(scores.completeness_score));
    print_score("Prosody", scores.prosody_score);

    if let Some(text) = &scores.recognized_text {
        println!("\n{} {}", "Recognized:".dimmed(), text);
    }

    if scores.words.is_empty() {
        return;
    }

    println!("\n{}", "Words:".cyan().bold());
    for word in &scores.words {
        let accuracy = word
            .accuracy_score
            .map(|s| format!("{:>5.1}", s))
            .unwrap_or_else(|| "    -".to_string());
        let marker = match word.error_type {
            ErrorType::None => "ok".green(),
            ErrorType::Omission | ErrorType::Insertion => word.error_type.as_str().yellow(),
            _ => word.error_type.as_str().red(),
        };
        println!("  {} {:<20} {}", accuracy, word.word, marker);
    }
}

fn print_score(label: &str, score: Option<f64>) {
    match score {
        Some(s) => println!("  {:<14} {:>5.1}", format!("{}:", label).dimmed(), s),
        None => println!("  {:<14} {:>5}", format!("{}:", label).dimmed(), "-"),
    }
}
