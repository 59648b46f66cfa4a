// Colored terminal output for classification results.
//
// main.rs delegates all human-readable rendering here; --json output bypasses
// this module entirely.

use colored::Colorize;

use crate::classify::{summarize, BatchResult, ClassificationResult};
use crate::topics::rank::TopicKind;

use super::truncate_chars;

/// Display one classification result as a ranked topic table.
pub fn display_classification(result: &ClassificationResult) {
    if !result.success {
        println!(
            "\n{} {}",
            "Classification failed:".red().bold(),
            result.url
        );
        if let Some(error) = &result.error {
            println!("  {}", error.dimmed());
        }
        return;
    }

    let title = result.page_title.as_deref().unwrap_or("");
    println!(
        "\n{}",
        format!("=== Topics for {} ===", truncate_chars(&result.url, 80)).bold()
    );
    if !title.is_empty() {
        println!("  {}", truncate_chars(title, 100).dimmed());
    }
    println!();

    let topics = result.topics_detailed.as_deref().unwrap_or_default();
    if topics.is_empty() {
        println!("  No topics found on this page.");
        return;
    }

    println!(
        "  {:>4}  {:<40} {:>7}  {:>5}  {:<7}",
        "Rank".dimmed(),
        "Topic".dimmed(),
        "Score".dimmed(),
        "Freq".dimmed(),
        "Type".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for (i, topic) in topics.iter().enumerate() {
        let kind = match topic.kind {
            TopicKind::Phrase => "phrase".bright_green(),
            TopicKind::Keyword => "keyword".bright_blue(),
        };
        println!(
            "  {:>4}. {:<40} {:>7.1}  {:>5}  {}",
            i + 1,
            truncate_chars(&topic.text, 40),
            topic.score,
            topic.frequency,
            kind,
        );
    }

    let summary = summarize(result);
    if let Some(meta) = &result.metadata {
        println!();
        println!(
            "  {} of {} topics ({} phrases, {} keywords), avg score {:.2}, {:.3}s",
            meta.topics_returned,
            meta.topics_found,
            summary.phrase_count,
            summary.keyword_count,
            summary.average_score,
            meta.total_time,
        );
    }
}

/// Display every result in a batch, followed by a success tally.
pub fn display_batch(batch: &BatchResult) {
    for result in &batch.results {
        display_classification(result);
    }

    let succeeded = batch.results.iter().filter(|r| r.success).count();
    let failed = batch.total_urls - succeeded;

    println!();
    println!(
        "  {} {} of {} URLs classified",
        "==".bold(),
        succeeded,
        batch.total_urls
    );
    if failed > 0 {
        println!("  {} {} failed", "!".bright_red(), failed);
    }
}
