//! Spaced repetition over weak questions
//!
//! A question enters the review table on its first failing score and climbs
//! a fixed interval ladder on passes. A failing score demotes it back to the
//! bottom rung. Reaching the top rung with a pass marks it learned, which is
//! terminal. Passing scores never create new records.

use std::fmt;
use std::sync::Arc;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::bank::{Question, QuestionBank};
use crate::progress::clock::Clock;
use crate::progress::store::{self, KvStore};

/// Review interval ladder, in days.
pub const INTERVALS: [i64; 5] = [1, 3, 7, 14, 30];

/// Scores at or above this do not need review.
pub const PASS_THRESHOLD: u32 = 70;

const REVIEW_KEY: &str = "spaced_repetition";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Per-question review state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(rename = "type")]
    pub type_id: String,
    /// Full score history for this question, append-only.
    pub scores: Vec<u32>,
    /// Epoch ms of the next scheduled review. Meaningless once learned.
    pub next_review: i64,
    pub interval_index: usize,
    pub learned: bool,
}

/// The persisted review table: question id -> record.
///
/// Serialized as a JSON object whose keys keep the order records were first
/// created in, so due questions surface in first-weak-occurrence order. A
/// plain map type would lose that, so the entries live in a Vec and the
/// map serde is written by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewTable {
    entries: Vec<(String, ReviewRecord)>,
}

impl ReviewTable {
    pub fn get(&self, question_id: &str) -> Option<&ReviewRecord> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, r)| r)
    }

    fn get_mut(&mut self, question_id: &str) -> Option<&mut ReviewRecord> {
        self.entries
            .iter_mut()
            .find(|(id, _)| id == question_id)
            .map(|(_, r)| r)
    }

    /// Append a new record. The caller ensures the id is not present yet.
    fn push(&mut self, question_id: String, record: ReviewRecord) {
        self.entries.push((question_id, record));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReviewRecord)> {
        self.entries.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReviewTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReviewTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ReviewTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of question ids to review records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, record)) = access.next_entry::<String, ReviewRecord>()? {
                    entries.push((id, record));
                }
                Ok(ReviewTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// A due review joined against the live question bank.
#[derive(Debug, Clone)]
pub struct DueQuestion {
    pub question_id: String,
    pub type_id: String,
    pub question: Question,
    pub record: ReviewRecord,
}

/// Schedules weak questions for resurfacing.
pub struct SpacedRepetitionScheduler {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl SpacedRepetitionScheduler {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record an attempt result for a question and reschedule it.
    pub fn track_result(&self, question_id: &str, type_id: &str, score: u32) {
        let mut table: ReviewTable = store::load_json(self.store.as_ref(), REVIEW_KEY);
        let now = self.clock.now_ms();

        match table.get_mut(question_id) {
            None => {
                if score >= PASS_THRESHOLD {
                    // Qualifying scores never create new records.
                    return;
                }
                debug!("tracking weak question '{}' (score {})", question_id, score);
                table.push(
                    question_id.to_string(),
                    ReviewRecord {
                        type_id: type_id.to_string(),
                        scores: vec![score],
                        next_review: now + INTERVALS[0] * MS_PER_DAY,
                        interval_index: 0,
                        learned: false,
                    },
                );
            }
            Some(record) => {
                record.scores.push(score);
                if score >= PASS_THRESHOLD {
                    let last = INTERVALS.len() - 1;
                    record.interval_index = (record.interval_index + 1).min(last);
                    if record.interval_index == last {
                        record.learned = true;
                        debug!("question '{}' graduated", question_id);
                        store::save_json(self.store.as_ref(), REVIEW_KEY, &table);
                        return;
                    }
                } else {
                    record.interval_index = 0;
                }
                record.next_review = now + INTERVALS[record.interval_index] * MS_PER_DAY;
            }
        }

        store::save_json(self.store.as_ref(), REVIEW_KEY, &table);
    }

    /// Non-learned records whose review time has arrived, joined against the
    /// bank. Records for questions no longer in the bank are skipped. Order
    /// is the order questions first entered the table.
    pub fn due_questions(&self, bank: &QuestionBank) -> Vec<DueQuestion> {
        let table: ReviewTable = store::load_json(self.store.as_ref(), REVIEW_KEY);
        let now = self.clock.now_ms();

        table
            .iter()
            .filter(|(_, r)| !r.learned && r.next_review <= now)
            .filter_map(|(id, record)| {
                let question = bank.find(&record.type_id, id)?;
                Some(DueQuestion {
                    question_id: id.to_string(),
                    type_id: record.type_id.clone(),
                    question: question.clone(),
                    record: record.clone(),
                })
            })
            .collect()
    }

    /// Number of reviews currently due.
    pub fn due_count(&self, bank: &QuestionBank) -> usize {
        self.due_questions(bank).len()
    }

    /// The full review table, in first-weak-occurrence order.
    pub fn table(&self) -> ReviewTable {
        store::load_json(self.store.as_ref(), REVIEW_KEY)
    }

    /// Drop all review state.
    pub fn reset(&self) {
        store::save_json(self.store.as_ref(), REVIEW_KEY, &ReviewTable::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::clock::FixedClock;
    use crate::progress::store::MemoryStore;

    fn scheduler() -> (SpacedRepetitionScheduler, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::at(2026, 3, 5, 10, 0));
        let sched = SpacedRepetitionScheduler::new(
            Arc::new(MemoryStore::new()),
            clock.clone(),
        );
        (sched, clock)
    }

    #[test]
    fn test_passing_score_without_record_is_noop() {
        let (sched, _) = scheduler();
        sched.track_result("ra_001", "read_aloud", 80);
        assert!(sched.table().is_empty());
        assert_eq!(sched.due_count(QuestionBank::builtin()), 0);
    }

    #[test]
    fn test_failing_score_creates_record() {
        let (sched, clock) = scheduler();
        let now = clock.now_ms();
        sched.track_result("ra_001", "read_aloud", 40);

        let table = sched.table();
        let record = table.get("ra_001").unwrap();
        assert_eq!(record.type_id, "read_aloud");
        assert_eq!(record.scores, vec![40]);
        assert_eq!(record.interval_index, 0);
        assert!(!record.learned);
        assert_eq!(record.next_review, now + MS_PER_DAY);
    }

    #[test]
    fn test_pass_advances_ladder() {
        let (sched, clock) = scheduler();
        sched.track_result("ra_001", "read_aloud", 40);
        let now = clock.now_ms();
        sched.track_result("ra_001", "read_aloud", 75);

        let table = sched.table();
        let record = table.get("ra_001").unwrap();
        assert_eq!(record.scores, vec![40, 75]);
        assert_eq!(record.interval_index, 1);
        assert_eq!(record.next_review, now + 3 * MS_PER_DAY);
    }

    #[test]
    fn test_fail_demotes_to_bottom() {
        let (sched, clock) = scheduler();
        sched.track_result("ra_001", "read_aloud", 40);
        sched.track_result("ra_001", "read_aloud", 75);
        sched.track_result("ra_001", "read_aloud", 78);
        let now = clock.now_ms();
        sched.track_result("ra_001", "read_aloud", 55);

        let table = sched.table();
        let record = table.get("ra_001").unwrap();
        assert_eq!(record.interval_index, 0);
        assert!(!record.learned);
        assert_eq!(record.next_review, now + MS_PER_DAY);
    }

    #[test]
    fn test_graduation_is_terminal() {
        let (sched, clock) = scheduler();
        sched.track_result("ra_001", "read_aloud", 40);
        let before_last = {
            sched.track_result("ra_001", "read_aloud", 75);
            sched.track_result("ra_001", "read_aloud", 76);
            sched.track_result("ra_001", "read_aloud", 77);
            sched.table().get("ra_001").unwrap().next_review
        };
        sched.track_result("ra_001", "read_aloud", 88);

        let table = sched.table();
        let record = table.get("ra_001").unwrap();
        assert_eq!(record.interval_index, INTERVALS.len() - 1);
        assert!(record.learned);
        // Learning short-circuits rescheduling; next_review stays stale.
        assert_eq!(record.next_review, before_last);

        // A learned question is never due, even long after.
        clock.advance_days(365);
        assert_eq!(sched.due_count(QuestionBank::builtin()), 0);
    }

    #[test]
    fn test_due_after_interval_elapses() {
        let (sched, clock) = scheduler();
        sched.track_result("ra_001", "read_aloud", 40);
        assert_eq!(sched.due_count(QuestionBank::builtin()), 0);

        clock.advance_days(1);
        let due = sched.due_questions(QuestionBank::builtin());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].question_id, "ra_001");
        assert_eq!(due[0].question.id, "ra_001");
    }

    #[test]
    fn test_due_order_is_first_weak_occurrence() {
        let (sched, clock) = scheduler();
        sched.track_result("rs_002", "repeat_sentence", 30);
        sched.track_result("ra_001", "read_aloud", 45);
        sched.track_result("sq_003", "answer_short_question", 60);

        clock.advance_days(2);
        let due: Vec<_> = sched
            .due_questions(QuestionBank::builtin())
            .into_iter()
            .map(|d| d.question_id)
            .collect();
        assert_eq!(due, vec!["rs_002", "ra_001", "sq_003"]);
    }

    #[test]
    fn test_vanished_question_is_skipped() {
        let (sched, clock) = scheduler();
        sched.track_result("gone_001", "read_aloud", 40);
        sched.track_result("ra_001", "read_aloud", 40);

        clock.advance_days(1);
        let due = sched.due_questions(QuestionBank::builtin());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].question_id, "ra_001");
    }

    #[test]
    fn test_table_document_shape_and_order() {
        let (sched, _) = scheduler();
        sched.track_result("rs_002", "repeat_sentence", 30);
        sched.track_result("ra_001", "read_aloud", 45);

        let json = serde_json::to_string(&sched.table()).unwrap();
        // Key order in the document matches creation order.
        assert!(json.find("rs_002").unwrap() < json.find("ra_001").unwrap());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rs_002"]["type"], "repeat_sentence");
        assert_eq!(value["rs_002"]["scores"][0], 30);
        assert_eq!(value["rs_002"]["intervalIndex"], 0);
        assert_eq!(value["rs_002"]["learned"], false);

        let decoded: ReviewTable = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sched.table());
    }

    #[test]
    fn test_reset_clears_table() {
        let (sched, _) = scheduler();
        sched.track_result("ra_001", "read_aloud", 40);
        sched.reset();
        assert!(sched.table().is_empty());
    }
}
