//! Shared test utilities for engine integration tests

use std::sync::Arc;

use speakdrill::bank::QuestionBank;
use speakdrill::progress::{AttemptInput, FixedClock, MemoryStore, PracticeEngine};

/// Build an engine over an in-memory store with a settable clock.
pub fn engine_at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> (PracticeEngine, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at(year, month, day, hour, minute));
    let engine = PracticeEngine::with_parts(
        Arc::new(MemoryStore::new()),
        clock.clone(),
        QuestionBank::builtin().clone(),
    );
    (engine, clock)
}

/// Plain (non-mock, non-prediction) attempt input.
pub fn attempt(type_id: &str, question_id: Option<&str>, score: u32) -> AttemptInput {
    AttemptInput {
        type_id: type_id.to_string(),
        question_id: question_id.map(String::from),
        score,
        duration_secs: Some(60),
        is_mock: false,
        is_prediction: false,
    }
}
