// Colored terminal output for classifications and daily statistics.
//
// main.rs display functions delegate here.

use colored::Colorize;

use crate::db::models::{ClassificationResult, DailyStatistic, Sentiment, StatisticsSummary};
use crate::pipeline::batch::BatchSummary;

/// Display one classification.
pub fn display_result(text: &str, result: &ClassificationResult) {
    println!();
    println!("  {}", format!("\"{}\"", super::truncate_chars(text, 120)).dimmed());
    println!(
        "  {} {}  ({:.0}% confidence)",
        "Sentiment:".bold(),
        colorize_label(result.label()),
        result.confidence() * 100.0,
    );

    if !result.evidence_words().is_empty() {
        println!("  {}", "Evidence:".bold());
        for (word, translation) in result
            .evidence_words()
            .iter()
            .zip(result.translations())
        {
            if word == translation {
                println!("    {}", word.green());
            } else {
                println!("    {} ({})", word.green(), translation.dimmed());
            }
        }
    }
    println!();
}

/// Display the daily rollups (newest first) and a summary of the window.
pub fn display_statistics(rows: &[DailyStatistic]) {
    if rows.is_empty() {
        println!("No statistics yet. Run `sentiment classify` or `sentiment init --demo` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Daily Sentiment ({} days) ===", rows.len()).bold()
    );
    println!();

    println!(
        "  {:<10}  {:>8}  {:>8}  {:>8}  {:>6}",
        "Date".dimmed(),
        "Positive".dimmed(),
        "Neutral".dimmed(),
        "Negative".dimmed(),
        "Total".dimmed(),
    );
    println!("  {}", "-".repeat(48).dimmed());

    for row in rows {
        println!(
            "  {:<10}  {:>8}  {:>8}  {:>8}  {:>6}",
            row.date.to_string(),
            row.positive.to_string().green(),
            row.neutral.to_string().yellow(),
            row.negative.to_string().red(),
            row.total,
        );
    }
    println!();

    display_summary(&StatisticsSummary::from_rows(rows));
}

fn display_summary(summary: &StatisticsSummary) {
    println!("  {} {} classifications", "Window:".bold(), summary.total);
    for label in Sentiment::ALL {
        println!(
            "    {:<18} {:>5.1}%",
            colorize_label(label),
            summary.share(label) * 100.0
        );
    }
    if let Some(latest) = &summary.latest {
        println!(
            "  {} {} ({} classifications)",
            "Latest day:".bold(),
            latest.date,
            latest.total
        );
    }
    println!();
}

/// Display the outcome of a batch run.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!(
        "\n{}",
        format!("=== Batch ({} texts) ===", summary.total()).bold()
    );
    println!("  {} {}", colorize_label(Sentiment::Positive), summary.positive);
    println!("  {} {}", colorize_label(Sentiment::Neutral), summary.neutral);
    println!("  {} {}", colorize_label(Sentiment::Negative), summary.negative);

    let unrecorded = summary.total() - summary.recorded;
    if unrecorded > 0 {
        println!(
            "  {} {} results could not be recorded (see log)",
            "!".bright_red(),
            unrecorded
        );
    }
    println!();
}

/// Colorize a sentiment label.
fn colorize_label(label: Sentiment) -> colored::ColoredString {
    match label {
        Sentiment::Positive => label.as_str().green().bold(),
        Sentiment::Neutral => label.as_str().yellow(),
        Sentiment::Negative => label.as_str().red().bold(),
    }
}
