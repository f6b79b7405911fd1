//! Badge definitions and unlock predicates
//!
//! Badges are one-time achievements. Each carries a static requirement that
//! is evaluated against the updated profile snapshot after every attempt;
//! once owned, a badge is never removed or re-awarded.

use super::profile::GamificationProfile;

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeId {
    FirstSession,
    TenSessions,
    FiftySessions,
    Century,
    HighScorer,
    PerfectNinety,
    Explorer,
    AllRounder,
    MockMarathon,
    FortuneTeller,
    NightOwl,
    EarlyBird,
    Streak3,
    Streak7,
    Streak30,
}

impl BadgeId {
    /// String id used in the stored profile document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSession => "first_session",
            Self::TenSessions => "ten_sessions",
            Self::FiftySessions => "fifty_sessions",
            Self::Century => "century",
            Self::HighScorer => "high_scorer",
            Self::PerfectNinety => "perfect_ninety",
            Self::Explorer => "explorer",
            Self::AllRounder => "all_rounder",
            Self::MockMarathon => "mock_marathon",
            Self::FortuneTeller => "fortune_teller",
            Self::NightOwl => "night_owl",
            Self::EarlyBird => "early_bird",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
        }
    }

    /// Parse from a stored string id.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_session" => Some(Self::FirstSession),
            "ten_sessions" => Some(Self::TenSessions),
            "fifty_sessions" => Some(Self::FiftySessions),
            "century" => Some(Self::Century),
            "high_scorer" => Some(Self::HighScorer),
            "perfect_ninety" => Some(Self::PerfectNinety),
            "explorer" => Some(Self::Explorer),
            "all_rounder" => Some(Self::AllRounder),
            "mock_marathon" => Some(Self::MockMarathon),
            "fortune_teller" => Some(Self::FortuneTeller),
            "night_owl" => Some(Self::NightOwl),
            "early_bird" => Some(Self::EarlyBird),
            "streak_3" => Some(Self::Streak3),
            "streak_7" => Some(Self::Streak7),
            "streak_30" => Some(Self::Streak30),
            _ => None,
        }
    }
}

/// What a badge requires, evaluated over cumulative profile stats.
/// `typesPlayed` enters as its cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRequirement {
    TotalAttempts(u32),
    BestScore(u32),
    TypesPlayed(u32),
    MockTests(u32),
    PredictionsDone(u32),
    DailyStreak(u32),
    NightOwl,
    EarlyBird,
}

impl BadgeRequirement {
    /// Evaluate against the updated profile snapshot.
    pub fn is_met(&self, profile: &GamificationProfile) -> bool {
        match *self {
            Self::TotalAttempts(n) => profile.total_attempts >= n,
            Self::BestScore(n) => profile.best_score >= n,
            Self::TypesPlayed(n) => profile.types_played.len() as u32 >= n,
            Self::MockTests(n) => profile.mock_tests >= n,
            Self::PredictionsDone(n) => profile.predictions_done >= n,
            Self::DailyStreak(n) => profile.streak >= n,
            Self::NightOwl => profile.night_owl,
            Self::EarlyBird => profile.early_bird,
        }
    }
}

/// Badge definition with display metadata
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: BadgeRequirement,
}

/// All badge definitions
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstSession,
        name: "First Steps",
        description: "Complete your first practice session",
        icon: "🎯",
        requirement: BadgeRequirement::TotalAttempts(1),
    },
    Badge {
        id: BadgeId::TenSessions,
        name: "Getting Started",
        description: "Complete 10 practice sessions",
        icon: "📈",
        requirement: BadgeRequirement::TotalAttempts(10),
    },
    Badge {
        id: BadgeId::FiftySessions,
        name: "Dedicated",
        description: "Complete 50 practice sessions",
        icon: "💪",
        requirement: BadgeRequirement::TotalAttempts(50),
    },
    Badge {
        id: BadgeId::Century,
        name: "Century",
        description: "Complete 100 practice sessions",
        icon: "💯",
        requirement: BadgeRequirement::TotalAttempts(100),
    },
    Badge {
        id: BadgeId::HighScorer,
        name: "High Scorer",
        description: "Score 80 or above on any attempt",
        icon: "🌟",
        requirement: BadgeRequirement::BestScore(80),
    },
    Badge {
        id: BadgeId::PerfectNinety,
        name: "Perfect Ninety",
        description: "Reach the maximum score of 90",
        icon: "🏆",
        requirement: BadgeRequirement::BestScore(90),
    },
    Badge {
        id: BadgeId::Explorer,
        name: "Explorer",
        description: "Practice 3 different question types",
        icon: "🗺️",
        requirement: BadgeRequirement::TypesPlayed(3),
    },
    Badge {
        id: BadgeId::AllRounder,
        name: "All-Rounder",
        description: "Practice all 5 question types",
        icon: "🎭",
        requirement: BadgeRequirement::TypesPlayed(5),
    },
    Badge {
        id: BadgeId::MockMarathon,
        name: "Mock Marathon",
        description: "Finish 5 mock tests",
        icon: "🏁",
        requirement: BadgeRequirement::MockTests(5),
    },
    Badge {
        id: BadgeId::FortuneTeller,
        name: "Fortune Teller",
        description: "Practice 10 prediction questions",
        icon: "🔮",
        requirement: BadgeRequirement::PredictionsDone(10),
    },
    Badge {
        id: BadgeId::NightOwl,
        name: "Night Owl",
        description: "Practice between 10 PM and 5 AM",
        icon: "🦉",
        requirement: BadgeRequirement::NightOwl,
    },
    Badge {
        id: BadgeId::EarlyBird,
        name: "Early Bird",
        description: "Practice between 4 AM and 7 AM",
        icon: "🐦",
        requirement: BadgeRequirement::EarlyBird,
    },
    Badge {
        id: BadgeId::Streak3,
        name: "On Fire",
        description: "Maintain a 3-day streak",
        icon: "🔥",
        requirement: BadgeRequirement::DailyStreak(3),
    },
    Badge {
        id: BadgeId::Streak7,
        name: "Week Warrior",
        description: "Maintain a 7-day streak",
        icon: "📅",
        requirement: BadgeRequirement::DailyStreak(7),
    },
    Badge {
        id: BadgeId::Streak30,
        name: "Monthly Master",
        description: "Maintain a 30-day streak",
        icon: "👑",
        requirement: BadgeRequirement::DailyStreak(30),
    },
];

impl Badge {
    /// Look up a badge definition by id.
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("all badges are defined")
    }

    /// Resolve a stored string id to its definition, if known.
    pub fn from_stored(s: &str) -> Option<&'static Badge> {
        BadgeId::from_str(s).map(Badge::get)
    }
}

/// Badges whose requirement is newly satisfied by the profile snapshot.
/// Already-owned badges are skipped.
pub fn newly_unlocked(profile: &GamificationProfile) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|b| !profile.badges.contains(b.id.as_str()))
        .filter(|b| b.requirement.is_met(profile))
        .collect()
}
