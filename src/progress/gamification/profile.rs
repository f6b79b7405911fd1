//! The persisted gamification profile
//!
//! Single instance, mutated only by the award pipeline. `xp` is the source
//! of truth; `level` is a cached projection of it. A corrupt stored profile
//! decodes to this default instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GamificationProfile {
    pub xp: u32,
    /// Cache of `Level::for_xp(xp)`; rewritten on every award.
    pub level: u32,
    pub streak: u32,
    /// Day key of the last counted play day.
    pub last_play_date: Option<String>,
    pub total_attempts: u32,
    pub best_score: u32,
    pub types_played: BTreeSet<String>,
    pub mock_tests: u32,
    pub predictions_done: u32,
    /// Owned badge ids.
    pub badges: BTreeSet<String>,
    /// Sticky time-of-day flags; set once, never cleared.
    pub night_owl: bool,
    pub early_bird: bool,
    /// Day key on which the daily-first bonus was last claimed.
    pub daily_xp_claimed: Option<String>,
}

impl Default for GamificationProfile {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_play_date: None,
            total_attempts: 0,
            best_score: 0,
            types_played: BTreeSet::new(),
            mock_tests: 0,
            predictions_done: 0,
            badges: BTreeSet::new(),
            night_owl: false,
            early_bird: false,
            daily_xp_claimed: None,
        }
    }
}
