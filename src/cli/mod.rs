//! CLI command implementations

pub mod daily;
pub mod overview;
pub mod record;
pub mod remind;
pub mod reset;
pub mod review;

use std::sync::Arc;

use anyhow::Result;

use speakdrill::bank::QuestionBank;
use speakdrill::config::Config;
use speakdrill::progress::{SqliteStore, SystemClock};
use speakdrill::PracticeEngine;

/// Build the engine from config: optional database override, optional
/// custom question bank.
pub fn build_engine(config: &Config) -> Result<PracticeEngine> {
    let store = match &config.database_path {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_default()?,
    };

    let bank = match &config.question_bank_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            QuestionBank::from_json(&raw)?
        }
        None => QuestionBank::builtin().clone(),
    };

    Ok(PracticeEngine::with_parts(
        Arc::new(store),
        Arc::new(SystemClock),
        bank,
    ))
}
