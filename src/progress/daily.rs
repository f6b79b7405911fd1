//! Date-keyed deterministic daily challenge
//!
//! One challenge per calendar day, regenerated when the stored date key no
//! longer matches today. Picks are driven entirely by a generator seeded
//! from the date key, so the same day always produces the same set.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bank::{Question, QuestionBank};
use crate::progress::clock::Clock;
use crate::progress::gamification::{GamificationEngine, LevelUp, XpRewards};
use crate::progress::models::MAX_SCORE;
use crate::progress::rng::SeededRng;
use crate::progress::store::{self, KvStore};

const CHALLENGE_KEY: &str = "daily_challenge";

/// Types every daily challenge must include.
const REQUIRED_TYPES: [&str; 4] = [
    "read_aloud",
    "repeat_sentence",
    "describe_image",
    "answer_short_question",
];

/// One slot of the daily set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeItem {
    #[serde(rename = "type")]
    pub type_id: String,
    pub question: Question,
    pub completed: bool,
    pub score: u32,
}

/// The persisted challenge document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyChallenge {
    /// Calendar day key this challenge belongs to.
    pub date: String,
    pub questions: Vec<ChallengeItem>,
    pub completed_count: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub finished: bool,
}

/// Outcome of marking a challenge item done.
#[derive(Debug)]
pub struct CompletionResult {
    pub challenge: DailyChallenge,
    /// True only on the call that completed the final item.
    pub finished_now: bool,
    pub level_up: Option<LevelUp>,
}

/// Builds and tracks the daily practice set.
pub struct DailyChallengeGenerator {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl DailyChallengeGenerator {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Today's challenge, generating and storing a fresh one if the stored
    /// document belongs to another day. Idempotent within a day.
    pub fn today_challenge(&self, bank: &QuestionBank) -> DailyChallenge {
        let today = self.clock.today_key();
        let stored: DailyChallenge = store::load_json(self.store.as_ref(), CHALLENGE_KEY);
        if stored.date == today {
            return stored;
        }

        let challenge = self.generate(&today, bank);
        debug!(
            "generated daily challenge for {} with {} items",
            today,
            challenge.questions.len()
        );
        store::save_json(self.store.as_ref(), CHALLENGE_KEY, &challenge);
        challenge
    }

    fn generate(&self, date_key: &str, bank: &QuestionBank) -> DailyChallenge {
        let mut rng = SeededRng::from_key(date_key);

        // Four required categories plus one wildcard drawn from whatever the
        // bank offers. The wildcard may repeat a required category.
        let mut plan: Vec<&str> = REQUIRED_TYPES.to_vec();
        let available = bank.available_types();
        if !available.is_empty() {
            plan.push(available[rng.next_index(available.len())]);
        }

        let mut used: BTreeSet<String> = BTreeSet::new();
        let mut questions = Vec::new();
        for type_id in plan {
            let pool = bank.questions(type_id);
            if pool.is_empty() {
                continue;
            }
            // Draw a start index, then probe forward (wrapping) past ids
            // already taken by an earlier slot. A fully-used pool skips
            // the slot.
            let start = rng.next_index(pool.len());
            let pick = (0..pool.len())
                .map(|offset| &pool[(start + offset) % pool.len()])
                .find(|q| !used.contains(&q.id));
            if let Some(question) = pick {
                used.insert(question.id.clone());
                questions.push(ChallengeItem {
                    type_id: type_id.to_string(),
                    question: question.clone(),
                    completed: false,
                    score: 0,
                });
            }
        }

        DailyChallenge {
            date: date_key.to_string(),
            questions,
            completed_count: 0,
            total_xp: 0,
            finished: false,
        }
    }

    /// Mark the item at `index` completed with `score`. First completion
    /// wins; later calls for the same item change nothing. Completing the
    /// final item finishes the challenge and delegates the one-time bonus
    /// award to the gamification engine.
    pub fn mark_completed(
        &self,
        index: usize,
        score: u32,
        engine: &GamificationEngine,
    ) -> CompletionResult {
        let mut challenge: DailyChallenge = store::load_json(self.store.as_ref(), CHALLENGE_KEY);
        let mut finished_now = false;
        let mut level_up = None;

        if let Some(item) = challenge.questions.get_mut(index) {
            if !item.completed {
                item.completed = true;
                item.score = score.min(MAX_SCORE);
                challenge.completed_count =
                    challenge.questions.iter().filter(|q| q.completed).count() as u32;

                let total = challenge.questions.len() as u32;
                if challenge.completed_count == total && !challenge.finished {
                    challenge.finished = true;
                    challenge.total_xp = XpRewards::DAILY_CHALLENGE;
                    finished_now = true;
                    level_up = engine.grant_bonus_xp(XpRewards::DAILY_CHALLENGE);
                    debug!("daily challenge {} finished", challenge.date);
                }

                store::save_json(self.store.as_ref(), CHALLENGE_KEY, &challenge);
            }
        }

        CompletionResult {
            challenge,
            finished_now,
            level_up,
        }
    }

    /// Drop the stored challenge; the next read regenerates it.
    pub fn reset(&self) {
        store::save_json(self.store.as_ref(), CHALLENGE_KEY, &DailyChallenge::default());
    }
}
