//! Display functions for command results

use super::formatters::{clock, create_progress_bar, hand_row, slot_row, star_string};
use crate::commands::SeedAnalysis;
use crate::round::RoundSnapshot;
use crate::schedule::DailyPlan;
use crate::scoring::Rating;
use colored::Colorize;

/// Most missed words listed after a round
const MISSED_SHOWN: usize = 12;

/// Print the analysis of a seed word
pub fn print_analysis_result(result: &SeedAnalysis) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "SEED ANALYSIS:".bright_cyan().bold(),
        result.seed.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n📊 Max score: {}  ({} words)",
        result.max_score.to_string().bright_yellow().bold(),
        result.total_words
    );

    println!("\n⭐ {}", "Star targets:".bright_cyan().bold());
    for &(star, points) in &result.star_targets {
        println!("   {}  {points:>6} pts", star_string(star, false));
    }

    for (length, words) in &result.words_by_length {
        println!(
            "\n{} {}",
            format!("{length} letters").bright_cyan().bold(),
            format!("({})", words.len()).bright_black()
        );
        let upper: Vec<String> = words.iter().map(|w| w.to_uppercase()).collect();
        println!("   {}", upper.join("  "));
    }
}

/// Print the live board: clock, assembled word and hand
pub fn print_board(snapshot: &RoundSnapshot) {
    println!(
        "{}  {}   {}   {}",
        clock(snapshot.time_remaining).bright_yellow(),
        slot_row(&snapshot.slots, &snapshot.tiles).bold(),
        hand_row(&snapshot.tiles),
        format!("{} pts", snapshot.total_score).green()
    );
}

/// Print the end-of-round summary
///
/// `missed` is the formable vocabulary minus the words the player found.
pub fn print_round_summary(
    snapshot: &RoundSnapshot,
    rating: Option<Rating>,
    max_score: u32,
    missed: &[String],
) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ROUND OVER:".bright_cyan().bold(),
        snapshot.seed.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n🏁 Score: {} / {}",
        snapshot.total_score.to_string().bright_yellow().bold(),
        max_score
    );
    if let Some(rating) = rating {
        let bar = create_progress_bar(rating.fraction, 1.0, 30);
        println!(
            "   [{}] {:.0}%  {}",
            bar.green(),
            rating.fraction * 100.0,
            star_string(rating.stars, rating.bonus_star).bright_yellow()
        );
    }

    println!(
        "\n✅ {} ({})",
        "Found:".bright_cyan().bold(),
        snapshot.scored_words.len()
    );
    for word in &snapshot.scored_words {
        println!(
            "   {:<10} {}",
            word.word.to_uppercase(),
            format!("+{}", word.points).green()
        );
    }

    if !missed.is_empty() {
        println!(
            "\n🔍 {} ({})",
            "Missed:".bright_cyan().bold(),
            missed.len()
        );
        let shown: Vec<String> = missed
            .iter()
            .take(MISSED_SHOWN)
            .map(|w| w.to_uppercase())
            .collect();
        let more = missed.len().saturating_sub(MISSED_SHOWN);
        if more > 0 {
            println!("   {}  {}", shown.join("  "), format!("+{more} more").bright_black());
        } else {
            println!("   {}", shown.join("  "));
        }
    }

    if let Some(err) = &snapshot.result_save_error {
        println!("\n{}", format!("⚠ {err}").yellow());
    }
}

/// Print a table of planned daily challenges
pub fn print_daily_plans(plans: &[DailyPlan]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "DAILY CHALLENGES".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if plans.is_empty() {
        println!("\n   Nothing to plan.");
        return;
    }
    for plan in plans {
        println!(
            "   {}  {}  {:>6} pts",
            plan.date,
            plan.seed_word.bright_yellow(),
            plan.max_score
        );
    }
}
