//! Overview command implementation

use anyhow::Result;

use speakdrill::bank::type_info;
use speakdrill::config::Config;
use speakdrill::progress::MAX_SCORE;

/// Show stats per question type, overall totals, level progress, and owned
/// badges.
pub fn overview_command(config: &Config) -> Result<()> {
    let engine = super::build_engine(config)?;
    let snapshot = engine.ledger().stats();
    let progress = engine.gamification().progress();

    println!(
        "Level {} - {} ({} XP, {}% to level {})",
        progress.level, progress.title, progress.xp, progress.percent, progress.next_level
    );
    println!(
        "Streak: {} day(s) | Attempts: {} | Best score: {}/{}",
        progress.streak, progress.total_attempts, progress.best_score, MAX_SCORE
    );
    println!();

    if snapshot.per_type.is_empty() {
        println!("No practice sessions recorded yet.");
    } else {
        println!("By question type:\n");
        for (type_id, stats) in &snapshot.per_type {
            let label = type_info(type_id)
                .map(|t| format!("{} {}", t.icon, t.name))
                .unwrap_or_else(|| type_id.clone());
            println!(
                "  {:<28} {:>3} attempt(s), avg {:>2}, best {:>2}",
                label, stats.total_attempts, stats.average_score, stats.best_score
            );
        }
        println!();

        let overall = &snapshot.overall;
        println!(
            "Overall: {} attempt(s), avg {}, {} min practiced",
            overall.total_attempts,
            overall.average_score,
            overall.total_practice_time / 60
        );
        println!();
    }

    if !progress.badges.is_empty() {
        println!("Badges ({}):\n", progress.badges.len());
        for badge in &progress.badges {
            println!("  {} {:<16} {}", badge.icon, badge.name, badge.description);
        }
        println!();
    }

    let due = engine.due_count();
    if due > 0 {
        println!("{} question(s) due for review - run `speakdrill review`.", due);
    }

    Ok(())
}
