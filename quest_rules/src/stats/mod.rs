//! Session statistics - the counters achievements are judged against.

use serde::{Deserialize, Serialize};

/// Cumulative progress for the current session.
///
/// Both counters only ever grow; a fresh session starts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub problems_solved: u32,
    pub quests_completed: u32,
}

impl Stats {
    /// Create a stats snapshot with the given counters.
    pub fn new(problems_solved: u32, quests_completed: u32) -> Self {
        Self {
            problems_solved,
            quests_completed,
        }
    }
}

/// Owns the live counters and hands out snapshots after every update.
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    stats: Stats,
}

impl StatsTracker {
    /// Create a tracker with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counters.
    pub fn snapshot(&self) -> Stats {
        self.stats
    }

    /// Count one solved puzzle and return the updated snapshot.
    pub fn record_puzzle_solved(&mut self) -> Stats {
        self.stats.problems_solved = self.stats.problems_solved.saturating_add(1);
        self.stats
    }

    /// Count one finished adventure and return the updated snapshot.
    pub fn record_quest_completed(&mut self) -> Stats {
        self.stats.quests_completed = self.stats.quests_completed.saturating_add(1);
        self.stats
    }
}
