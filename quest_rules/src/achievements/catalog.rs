//! The fixed achievement catalog.

use super::Achievement;

pub const FIRST_STEP: &str = "first_step";
pub const ARITHMANCER_APPRENTICE: &str = "arithmancer_apprentice";
pub const MASTER_MULTIPLIER: &str = "master_multiplier";
pub const QUEST_COMPLETE: &str = "quest_complete";
pub const SEASONED_EXPLORER: &str = "seasoned_explorer";

/// Every achievement in display order, all locked.
///
/// Each call builds a fresh list; a new session starts from this.
pub fn catalog() -> Vec<Achievement> {
    vec![
        Achievement::new(FIRST_STEP, "First Steps", "Solve your first puzzle.", "🎯"),
        Achievement::new(
            ARITHMANCER_APPRENTICE,
            "Arithmancer's Apprentice",
            "Solve 5 puzzles correctly.",
            "🧮",
        ),
        Achievement::new(
            MASTER_MULTIPLIER,
            "Master Multiplier",
            "Solve 15 puzzles correctly.",
            "✨",
        ),
        Achievement::new(
            QUEST_COMPLETE,
            "Quest Complete",
            "Finish an entire adventure.",
            "🏆",
        ),
        Achievement::new(
            SEASONED_EXPLORER,
            "Seasoned Explorer",
            "Complete 3 adventures.",
            "🗺️",
        ),
    ]
}
