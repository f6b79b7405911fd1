//! Progress and adaptive practice engine
//!
//! Tracks practice sessions, derived statistics, gamification rewards,
//! spaced-repetition scheduling, and the daily challenge over a single
//! SQLite key-value store (`~/.speakdrill/progress.db`).
//!
//! # Architecture
//!
//! ```text
//! record_attempt
//!       │
//!       ▼
//! SessionLedger ──► StatsAggregator (full recompute)
//!       │
//!       ▼
//! GamificationEngine (XP, levels, streaks, badges)
//!       │
//!       ▼ (question attempts only)
//! SpacedRepetitionScheduler
//!
//! DailyChallengeGenerator runs independently and delegates its
//! one-time completion bonus to GamificationEngine.
//! ```
//!
//! Every subsystem owns a disjoint storage key, reads fall back to typed
//! defaults, and writes are best-effort, so no engine operation fails.
//!
//! # Usage
//!
//! ```ignore
//! let engine = PracticeEngine::new()?;
//!
//! // Record a completed attempt
//! let outcome = engine.record_attempt(&attempt);
//!
//! // Query for display
//! let stats = engine.ledger().stats();
//! let progress = engine.gamification().progress();
//! ```

pub mod clock;
pub mod daily;
pub mod gamification;
pub mod ledger;
pub mod models;
pub mod reminders;
pub mod rng;
pub mod spaced;
pub mod stats;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::{ChallengeItem, CompletionResult, DailyChallenge, DailyChallengeGenerator};
pub use gamification::{
    AwardSummary, Badge, BadgeId, GamificationEngine, GamificationProfile, Level, LevelProgress,
    LevelUp, XpRewards, BADGES, LEVELS,
};
pub use ledger::SessionLedger;
pub use models::{
    AttemptInput, OverallStats, PracticeSession, QuestionCompletion, StatsSnapshot, TypeStats,
    LEDGER_CAP, MAX_SCORE,
};
pub use reminders::{LogNotifier, Notifier, ReminderSchedule, ReminderScheduler};
pub use spaced::{DueQuestion, ReviewRecord, SpacedRepetitionScheduler, INTERVALS, PASS_THRESHOLD};
pub use store::{KvStore, MemoryStore, SqliteStore, StoreError};

use std::sync::Arc;

use crate::bank::QuestionBank;

/// Everything `record_attempt` produced for one completed attempt.
#[derive(Debug)]
pub struct AttemptOutcome {
    pub session: PracticeSession,
    pub award: AwardSummary,
}

/// Central engine facade
///
/// Constructs every subsystem once over a shared store and clock and wires
/// the attempt pipeline between them. Thread-safe through the mutex inside
/// the store.
#[derive(Clone)]
pub struct PracticeEngine {
    ledger: SessionLedger,
    gamification: GamificationEngine,
    scheduler: Arc<SpacedRepetitionScheduler>,
    daily: Arc<DailyChallengeGenerator>,
    bank: Arc<QuestionBank>,
}

impl PracticeEngine {
    /// Create an engine over the default database location with the system
    /// clock and the built-in question bank.
    pub fn new() -> Result<Self, StoreError> {
        let store = SqliteStore::open_default()?;
        Ok(Self::with_parts(
            Arc::new(store),
            Arc::new(SystemClock),
            QuestionBank::builtin().clone(),
        ))
    }

    /// Create an engine over explicit collaborators. Tests pair this with
    /// `MemoryStore` and `FixedClock`.
    pub fn with_parts(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        bank: QuestionBank,
    ) -> Self {
        Self {
            ledger: SessionLedger::new(store.clone(), clock.clone()),
            gamification: GamificationEngine::new(store.clone(), clock.clone()),
            scheduler: Arc::new(SpacedRepetitionScheduler::new(store.clone(), clock.clone())),
            daily: Arc::new(DailyChallengeGenerator::new(store, clock)),
            bank: Arc::new(bank),
        }
    }

    /// Record a completed attempt: ledger insert, stats recompute, reward
    /// pass, and (for question attempts) review scheduling.
    pub fn record_attempt(&self, attempt: &AttemptInput) -> AttemptOutcome {
        let session = self.ledger.add_session(attempt);
        let award = self.gamification.award_xp(
            session.overall_score,
            &session.type_id,
            attempt.is_mock,
            attempt.is_prediction,
        );
        if let Some(question_id) = &session.question_id {
            self.scheduler
                .track_result(question_id, &session.type_id, session.overall_score);
        }
        AttemptOutcome { session, award }
    }

    /// Today's challenge, generated on first access each day.
    pub fn today_challenge(&self) -> DailyChallenge {
        self.daily.today_challenge(&self.bank)
    }

    /// Mark a daily-challenge item completed; finishing the set awards the
    /// completion bonus through the gamification engine.
    pub fn complete_daily_item(&self, index: usize, score: u32) -> CompletionResult {
        self.daily.mark_completed(index, score, &self.gamification)
    }

    /// Reviews currently due, in first-weak-occurrence order.
    pub fn due_questions(&self) -> Vec<DueQuestion> {
        self.scheduler.due_questions(&self.bank)
    }

    pub fn due_count(&self) -> usize {
        self.scheduler.due_count(&self.bank)
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn gamification(&self) -> &GamificationEngine {
        &self.gamification
    }

    pub fn scheduler(&self) -> &SpacedRepetitionScheduler {
        &self.scheduler
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Wipe every subsystem's document (full reset).
    pub fn reset(&self) {
        self.ledger.reset();
        self.gamification.reset();
        self.scheduler.reset();
        self.daily.reset();
    }
}
