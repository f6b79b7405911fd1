//! SpeakDrill - speaking practice progress tracker
//!
//! SpeakDrill records scored speaking attempts (0-90 scale), derives
//! statistics and daily streaks, rewards progress with XP, levels, and
//! badges, resurfaces weak questions through spaced repetition, and builds
//! a deterministic date-seeded daily challenge.
//!
//! Everything lives in a local SQLite key-value store; storage faults never
//! surface past the engine, so recording an attempt always succeeds.

pub mod bank;
pub mod config;
pub mod progress;

pub use progress::{AttemptInput, AttemptOutcome, PracticeEngine};
