// Colored terminal output for recommendation lists.
//
// This module handles all terminal-specific formatting: colors, score
// bars, tables. The main.rs display paths delegate here.

use colored::Colorize;

use crate::model::{Item, ScoredItem};
use crate::output::{clean_text, truncate_chars};

/// Display a similarity ranking as an id/score table with bars.
pub fn display_ranking(ranking: &[ScoredItem], user_id: &str) {
    if ranking.is_empty() {
        println!("No recommendations for {user_id} — empty profile or nothing scored positive.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recommendations for {user_id} ({} items) ===", ranking.len()).bold()
    );
    println!();

    let max_score = ranking.first().map(|s| s.score).unwrap_or(1.0).max(1e-9);
    let bar_width: usize = 20;

    for (i, scored) in ranking.iter().enumerate() {
        let filled = ((scored.score / max_score) * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.min(bar_width)),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        let colored_bar = if i == 0 {
            bar.bright_green()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>3}. {:<50} {} {:.3}",
            i + 1,
            truncate_chars(&scored.item_id, 48),
            colored_bar,
            scored.score
        );
    }
    println!();
}

/// Display ranked items (topic or diversity path) with source and title.
pub fn display_items(items: &[Item], heading: &str) {
    if items.is_empty() {
        println!("No eligible items to recommend.");
        return;
    }

    println!("\n{}", format!("=== {heading} ({} items) ===", items.len()).bold());
    println!();

    for (i, item) in items.iter().enumerate() {
        println!(
            "  {:>3}. {} {}",
            i + 1,
            truncate_chars(&clean_text(&item.title), 60).bold(),
            format!("({})", item.source_key()).dimmed()
        );
        if !item.description.trim().is_empty() {
            println!(
                "       {}",
                truncate_chars(&clean_text(&item.description), 90).dimmed()
            );
        }
    }
    println!();
}

/// Display combined-interest matches beneath the main ranking.
pub fn display_combined(matches: &[(Item, String)]) {
    if matches.is_empty() {
        return;
    }
    println!("{}", "--- Combined interests ---".bold());
    for (item, label) in matches {
        println!(
            "  {} {}",
            format!("[{label}]").bright_yellow(),
            truncate_chars(&clean_text(&item.title), 60)
        );
    }
    println!();
}
