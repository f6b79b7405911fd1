//! Review command implementation

use anyhow::Result;

use speakdrill::bank::type_info;
use speakdrill::config::Config;
use speakdrill::progress::INTERVALS;

/// List the questions due for spaced-repetition review, oldest weakness
/// first.
pub fn review_command(config: &Config) -> Result<()> {
    let engine = super::build_engine(config)?;
    let due = engine.due_questions();

    if due.is_empty() {
        println!("Nothing due for review.");
        return Ok(());
    }

    println!("Due for review ({}):\n", due.len());
    for item in &due {
        let label = type_info(&item.type_id)
            .map(|t| format!("{} {}", t.icon, t.name))
            .unwrap_or_else(|| item.type_id.clone());
        let last = item.record.scores.last().copied().unwrap_or(0);
        println!("  [{}] {}", item.question_id, label);
        println!("    {}", item.question.text);
        println!(
            "    last score {}, rung {}/{}, {} attempt(s)",
            last,
            item.record.interval_index + 1,
            INTERVALS.len(),
            item.record.scores.len()
        );
        println!();
    }

    Ok(())
}
