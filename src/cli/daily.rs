//! Daily challenge command implementation

use anyhow::{bail, Result};

use speakdrill::bank::type_info;
use speakdrill::config::Config;
use speakdrill::progress::MAX_SCORE;

/// Show today's challenge, or mark one of its items completed.
pub fn daily_command(config: &Config, complete: Option<usize>, score: Option<u32>) -> Result<()> {
    let engine = super::build_engine(config)?;

    if let Some(index) = complete {
        let Some(score) = score else {
            bail!("--complete requires --score");
        };
        if score > MAX_SCORE {
            bail!("score must be between 0 and {}", MAX_SCORE);
        }

        let total = engine.today_challenge().questions.len();
        if index >= total {
            bail!("item index {} out of range (challenge has {} items)", index, total);
        }

        let result = engine.complete_daily_item(index, score);
        println!(
            "Item {} completed with score {} ({}/{} done).",
            index,
            result.challenge.questions[index].score,
            result.challenge.completed_count,
            result.challenge.questions.len()
        );
        if result.finished_now {
            println!("Challenge finished! +{} XP", result.challenge.total_xp);
            if let Some(level_up) = result.level_up {
                println!(
                    "Level up! {} -> {} ({})",
                    level_up.old_level, level_up.new_level, level_up.new_title
                );
            }
        }
        return Ok(());
    }

    let challenge = engine.today_challenge();
    println!("Daily challenge for {}:\n", challenge.date);
    if challenge.questions.is_empty() {
        println!("  (question bank is empty)");
        return Ok(());
    }

    for (i, item) in challenge.questions.iter().enumerate() {
        let label = type_info(&item.type_id)
            .map(|t| format!("{} {}", t.icon, t.name))
            .unwrap_or_else(|| item.type_id.clone());
        let status = if item.completed {
            format!("done, {}", item.score)
        } else {
            "open".to_string()
        };
        println!("  {}. [{}] {}", i, status, label);
        println!("     {}", item.question.text);
    }
    println!();
    println!(
        "{}/{} completed{}",
        challenge.completed_count,
        challenge.questions.len(),
        if challenge.finished {
            format!(" - finished, +{} XP", challenge.total_xp)
        } else {
            String::new()
        }
    );

    Ok(())
}
