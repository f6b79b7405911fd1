//! Gamification: XP, levels, streaks, and badges
//!
//! A state machine over a single persisted profile. Attempt outcomes go in,
//! reward events come out.

mod badges;
mod engine;
mod levels;
mod profile;

pub use badges::{Badge, BadgeId, BadgeRequirement, BADGES};
pub use engine::{AwardSummary, GamificationEngine, LevelProgress, LevelUp};
pub use levels::{Level, XpRewards, LEVELS};
pub use profile::GamificationProfile;
