//! Pure derivation of statistics from the session ledger
//!
//! `recompute` rebuilds the full snapshot from the raw session sequence on
//! every call. Nothing here mutates state or touches the store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::clock::local_date;
use super::models::{OverallStats, PracticeSession, StatsSnapshot, TypeStats, RECENT_SCORES_WINDOW};

/// Rebuild the stats snapshot for a newest-first session sequence.
/// `today` anchors the streak walk.
pub fn recompute(sessions: &[PracticeSession], today: NaiveDate) -> StatsSnapshot {
    let mut per_type: BTreeMap<String, Vec<&PracticeSession>> = BTreeMap::new();
    for session in sessions {
        per_type
            .entry(session.type_id.clone())
            .or_default()
            .push(session);
    }

    let per_type = per_type
        .into_iter()
        .map(|(type_id, group)| (type_id, type_stats(&group)))
        .collect();

    let all: Vec<&PracticeSession> = sessions.iter().collect();
    let base = type_stats(&all);
    let overall = OverallStats {
        total_attempts: base.total_attempts,
        average_score: base.average_score,
        best_score: base.best_score,
        recent_scores: base.recent_scores,
        last_attempt_date: base.last_attempt_date,
        total_practice_time: sessions
            .iter()
            .filter_map(|s| s.duration)
            .map(u64::from)
            .sum(),
        streak: streak(sessions, today),
    };

    StatsSnapshot { per_type, overall }
}

/// Aggregate a newest-first group of sessions into one stats entry.
fn type_stats(group: &[&PracticeSession]) -> TypeStats {
    if group.is_empty() {
        return TypeStats::default();
    }

    let sum: u64 = group.iter().map(|s| u64::from(s.overall_score)).sum();
    let mean = sum as f64 / group.len() as f64;

    TypeStats {
        total_attempts: group.len() as u32,
        average_score: mean.round() as u32,
        best_score: group.iter().map(|s| s.overall_score).max().unwrap_or(0),
        recent_scores: group
            .iter()
            .take(RECENT_SCORES_WINDOW)
            .map(|s| s.overall_score)
            .collect(),
        last_attempt_date: group[0].date.clone(),
    }
}

/// Count consecutive practice days ending today.
///
/// Walks the distinct local calendar days present in the history, newest
/// first. A day counts if it equals the current check day or the day just
/// before it; the check day then advances to it. The first day that is
/// neither ends the walk, so any session-free day breaks the streak there.
pub fn streak(sessions: &[PracticeSession], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = sessions
        .iter()
        .filter_map(|s| local_date(s.timestamp))
        .collect();

    let mut count = 0;
    let mut check = today;
    for day in days.into_iter().rev() {
        if day == check || day == check.pred_opt().unwrap_or(check) {
            count += 1;
            check = day;
        } else {
            break;
        }
    }
    count
}
