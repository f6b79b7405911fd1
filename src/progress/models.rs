//! Data models for the session ledger and derived statistics
//!
//! Stored documents use camelCase field names; the serde renames here define
//! the on-disk shapes and must stay stable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest achievable score (PTE-style 0-90 scale).
pub const MAX_SCORE: u32 = 90;

/// How many sessions the ledger retains.
pub const LEDGER_CAP: usize = 200;

/// How many recent scores each stats entry keeps.
pub const RECENT_SCORES_WINDOW: usize = 10;

/// A completed practice attempt as submitted by the caller.
#[derive(Debug, Clone)]
pub struct AttemptInput {
    /// Question type id (catalog key, e.g. "read_aloud").
    pub type_id: String,
    /// Stable question id, when the attempt targeted a bank question.
    pub question_id: Option<String>,
    /// Overall score, clamped to 0-90 on intake.
    pub score: u32,
    /// Attempt duration in seconds, when measured.
    pub duration_secs: Option<u32>,
    /// Whether this attempt was part of a mock test.
    pub is_mock: bool,
    /// Whether this attempt was on a prediction-list question.
    pub is_prediction: bool,
}

/// One stored practice attempt. Immutable once in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub overall_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Unix milliseconds of completion.
    pub timestamp: i64,
    /// Display date string ("YYYY-MM-DD", local time).
    pub date: String,
}

/// Derived statistics for a single question type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeStats {
    pub total_attempts: u32,
    /// Rounded mean of all scores for the type.
    pub average_score: u32,
    pub best_score: u32,
    /// Up to the last 10 scores, newest first.
    pub recent_scores: Vec<u32>,
    pub last_attempt_date: String,
}

/// Derived statistics across all sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_attempts: u32,
    pub average_score: u32,
    pub best_score: u32,
    pub recent_scores: Vec<u32>,
    pub last_attempt_date: String,
    /// Sum of recorded durations, in seconds.
    pub total_practice_time: u64,
    /// Consecutive calendar days with at least one session, ending today.
    pub streak: u32,
}

/// Full stats snapshot. Recomputed from scratch on every ledger insert so it
/// can never drift from the raw history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StatsSnapshot {
    /// Per-type entries, keyed by type id. Only types with >= 1 session
    /// appear.
    #[serde(flatten)]
    pub per_type: BTreeMap<String, TypeStats>,
    pub overall: OverallStats,
}

/// The persisted ledger document: raw history plus its derived snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LedgerDoc {
    /// Newest-first, capped at [`LEDGER_CAP`].
    pub sessions: Vec<PracticeSession>,
    pub stats: StatsSnapshot,
}

/// Per-question aggregation returned by `completion_map`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCompletion {
    pub attempts: u32,
    pub best_score: u32,
    pub latest_score: u32,
    pub latest_session: PracticeSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_document_shape() {
        let session = PracticeSession {
            type_id: "read_aloud".to_string(),
            question_id: Some("ra_001".to_string()),
            overall_score: 72,
            duration: Some(40),
            timestamp: 1_770_000_000_000,
            date: "2026-02-02".to_string(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["type"], "read_aloud");
        assert_eq!(json["questionId"], "ra_001");
        assert_eq!(json["overallScore"], 72);
        assert_eq!(json["duration"], 40);
        assert_eq!(json["date"], "2026-02-02");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let session = PracticeSession {
            type_id: "describe_image".to_string(),
            question_id: None,
            overall_score: 55,
            duration: None,
            timestamp: 0,
            date: "2026-02-02".to_string(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("questionId").is_none());
        assert!(json.get("duration").is_none());
    }

    #[test]
    fn test_stats_snapshot_flattens_types() {
        let mut snapshot = StatsSnapshot::default();
        snapshot.per_type.insert(
            "read_aloud".to_string(),
            TypeStats {
                total_attempts: 2,
                average_score: 70,
                best_score: 80,
                recent_scores: vec![80, 60],
                last_attempt_date: "2026-02-02".to_string(),
            },
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        // Type entries sit next to "overall", not nested under a map field.
        assert!(json.get("read_aloud").is_some());
        assert!(json.get("overall").is_some());
        assert_eq!(json["read_aloud"]["totalAttempts"], 2);
    }
}
