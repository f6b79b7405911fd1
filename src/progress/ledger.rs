//! Session ledger - append-only capped log of practice attempts
//!
//! Owns the raw history document. Every insert stamps the attempt, prepends
//! it, truncates to the cap, recomputes the derived stats snapshot in full,
//! and persists best-effort.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::clock::{day_key, Clock};
use super::models::{
    AttemptInput, LedgerDoc, PracticeSession, QuestionCompletion, StatsSnapshot, LEDGER_CAP,
    MAX_SCORE,
};
use super::stats;
use super::store::{load_json, save_json, KvStore};

const LEDGER_KEY: &str = "ledger";

/// Append-only (capped) log of practice attempts.
#[derive(Clone)]
pub struct SessionLedger {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl SessionLedger {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a completed attempt. Stamps timestamp and display date,
    /// prepends, truncates to the cap, recomputes stats, persists.
    /// Never fails: a persistence fault is absorbed by the store layer.
    pub fn add_session(&self, attempt: &AttemptInput) -> PracticeSession {
        let now = self.clock.now();
        let session = PracticeSession {
            type_id: attempt.type_id.clone(),
            question_id: attempt.question_id.clone(),
            overall_score: attempt.score.min(MAX_SCORE),
            duration: attempt.duration_secs,
            timestamp: now.timestamp_millis(),
            date: day_key(&now),
        };

        let mut doc = self.load();
        doc.sessions.insert(0, session.clone());
        doc.sessions.truncate(LEDGER_CAP);
        doc.stats = stats::recompute(&doc.sessions, now.date_naive());
        save_json(self.store.as_ref(), LEDGER_KEY, &doc);

        debug!(
            "ledger: recorded {} attempt (score {}), {} sessions retained",
            session.type_id,
            session.overall_score,
            doc.sessions.len()
        );
        session
    }

    /// All stored sessions, newest first.
    pub fn sessions(&self) -> Vec<PracticeSession> {
        self.load().sessions
    }

    /// The derived stats snapshot persisted with the ledger.
    pub fn stats(&self) -> StatsSnapshot {
        self.load().stats
    }

    /// Sessions of one question type, newest first.
    pub fn by_type(&self, type_id: &str) -> Vec<PracticeSession> {
        self.load()
            .sessions
            .into_iter()
            .filter(|s| s.type_id == type_id)
            .collect()
    }

    /// The `n` most recent sessions.
    pub fn recent(&self, n: usize) -> Vec<PracticeSession> {
        let mut sessions = self.load().sessions;
        sessions.truncate(n);
        sessions
    }

    /// All attempts on a specific question, newest first.
    pub fn by_question(&self, question_id: &str) -> Vec<PracticeSession> {
        self.load()
            .sessions
            .into_iter()
            .filter(|s| s.question_id.as_deref() == Some(question_id))
            .collect()
    }

    /// Best score recorded for a question, if any attempt exists.
    pub fn best_for_question(&self, question_id: &str) -> Option<u32> {
        self.by_question(question_id)
            .iter()
            .map(|s| s.overall_score)
            .max()
    }

    /// Most recent attempt on a question.
    pub fn latest_for_question(&self, question_id: &str) -> Option<PracticeSession> {
        self.by_question(question_id).into_iter().next()
    }

    /// Per-question aggregation for one type, keyed by question id. The
    /// first occurrence per id in the newest-first sequence defines
    /// "latest".
    pub fn completion_map(&self, type_id: &str) -> BTreeMap<String, QuestionCompletion> {
        let mut map: BTreeMap<String, QuestionCompletion> = BTreeMap::new();
        for session in self.by_type(type_id) {
            let Some(qid) = session.question_id.clone() else {
                continue;
            };
            match map.get_mut(&qid) {
                Some(entry) => {
                    entry.attempts += 1;
                    entry.best_score = entry.best_score.max(session.overall_score);
                }
                None => {
                    map.insert(
                        qid,
                        QuestionCompletion {
                            attempts: 1,
                            best_score: session.overall_score,
                            latest_score: session.overall_score,
                            latest_session: session,
                        },
                    );
                }
            }
        }
        map
    }

    /// Drop all history and stats (full reset).
    pub fn reset(&self) {
        save_json(self.store.as_ref(), LEDGER_KEY, &LedgerDoc::default());
    }

    fn load(&self) -> LedgerDoc {
        load_json(self.store.as_ref(), LEDGER_KEY)
    }
}
