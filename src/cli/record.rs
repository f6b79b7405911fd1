//! Record command implementation

use anyhow::{bail, Result};

use speakdrill::bank::{type_info, TYPES};
use speakdrill::config::Config;
use speakdrill::progress::MAX_SCORE;
use speakdrill::AttemptInput;

/// Record a completed practice attempt and print the rewards it earned.
pub fn record_command(
    config: &Config,
    type_id: String,
    score: u32,
    question: Option<String>,
    duration: Option<u32>,
    mock: bool,
    prediction: bool,
) -> Result<()> {
    let Some(info) = type_info(&type_id) else {
        let known: Vec<_> = TYPES.iter().map(|t| t.id).collect();
        bail!("unknown question type '{}' (known: {})", type_id, known.join(", "));
    };
    if score > MAX_SCORE {
        bail!("score must be between 0 and {}", MAX_SCORE);
    }

    let engine = super::build_engine(config)?;
    let outcome = engine.record_attempt(&AttemptInput {
        type_id,
        question_id: question,
        score,
        duration_secs: duration,
        is_mock: mock,
        is_prediction: prediction,
    });

    println!(
        "{} {} - scored {}/{}",
        info.icon, info.name, outcome.session.overall_score, MAX_SCORE
    );
    println!();
    for event in &outcome.award.events {
        println!("  {}", event);
    }
    println!();
    println!(
        "  +{} XP (total {}), streak {} day(s)",
        outcome.award.xp_gained, outcome.award.total_xp, outcome.award.streak
    );

    if outcome.award.leveled_up {
        let progress = engine.gamification().progress();
        println!(
            "  Level up! {} -> {} ({})",
            outcome.award.old_level, outcome.award.new_level, progress.title
        );
    }

    let due = engine.due_count();
    if due > 0 {
        println!("  {} question(s) waiting for review", due);
    }

    Ok(())
}
