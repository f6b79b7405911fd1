//! XP and level system
//!
//! Defines the level threshold table, titles, and XP reward constants.
//! XP is the source of truth; the level is always re-derivable from it.

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub level: u32,
    pub xp_required: u32,
    pub title: &'static str,
}

/// All level definitions (ascending thresholds).
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        xp_required: 0,
        title: "First Words",
    },
    Level {
        level: 2,
        xp_required: 100,
        title: "Warming Up",
    },
    Level {
        level: 3,
        xp_required: 250,
        title: "Finding a Voice",
    },
    Level {
        level: 4,
        xp_required: 500,
        title: "Steady Speaker",
    },
    Level {
        level: 5,
        xp_required: 1000,
        title: "Confident Speaker",
    },
    Level {
        level: 6,
        xp_required: 2000,
        title: "Smooth Talker",
    },
    Level {
        level: 7,
        xp_required: 3500,
        title: "Orator",
    },
    Level {
        level: 8,
        xp_required: 5500,
        title: "Wordsmith",
    },
    Level {
        level: 9,
        xp_required: 8000,
        title: "Silver Tongue",
    },
    Level {
        level: 10,
        xp_required: 11000,
        title: "Fluency Master",
    },
];

impl Level {
    /// Highest level whose threshold is <= xp. Pure and monotonic.
    pub fn for_xp(xp: u32) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .unwrap_or(&LEVELS[0])
    }

    /// The first level entry with a threshold above `xp`, or None at the top.
    pub fn next_for_xp(xp: u32) -> Option<&'static Level> {
        LEVELS.iter().find(|l| l.xp_required > xp)
    }
}

/// XP rewards for the award pipeline.
pub struct XpRewards;

impl XpRewards {
    /// Completing any practice attempt.
    pub const COMPLETION: u32 = 10;

    /// Score-tier bonuses; only the highest qualifying tier applies.
    pub const TIER_EXCELLENT: u32 = 25; // score >= 80
    pub const TIER_GREAT: u32 = 15; // score >= 70
    pub const TIER_GOOD: u32 = 5; // score >= 50

    /// First attempt of a calendar day.
    pub const DAILY_FIRST: u32 = 20;

    /// Completing a mock test attempt.
    pub const MOCK_TEST: u32 = 50;

    /// Flat bonus for each newly unlocked badge.
    pub const BADGE_UNLOCK: u32 = 50;

    /// Finishing the whole daily challenge.
    pub const DAILY_CHALLENGE: u32 = 100;

    /// Score-tier bonus for an attempt score.
    pub fn score_tier(score: u32) -> u32 {
        if score >= 80 {
            Self::TIER_EXCELLENT
        } else if score >= 70 {
            Self::TIER_GREAT
        } else if score >= 50 {
            Self::TIER_GOOD
        } else {
            0
        }
    }

    /// Streak bonus: 5 XP per consecutive day, capped at 50.
    pub fn streak_bonus(streak_days: u32) -> u32 {
        (streak_days * 5).min(50)
    }
}
