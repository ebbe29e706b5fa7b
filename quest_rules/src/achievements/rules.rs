//! Unlock rules - a static priority table of threshold predicates.

use super::catalog::{
    ARITHMANCER_APPRENTICE, FIRST_STEP, MASTER_MULTIPLIER, QUEST_COMPLETE, SEASONED_EXPLORER,
};
use crate::stats::Stats;

/// A minimum value for one of the session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    ProblemsSolved(u32),
    QuestsCompleted(u32),
}

impl Threshold {
    /// Check whether `stats` has reached this threshold.
    pub fn is_met(&self, stats: &Stats) -> bool {
        match *self {
            Threshold::ProblemsSolved(min) => stats.problems_solved >= min,
            Threshold::QuestsCompleted(min) => stats.quests_completed >= min,
        }
    }
}

/// Pairs an achievement id with the threshold that unlocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub threshold: Threshold,
}

/// Unlock rules in priority order. Earlier entries win ties.
pub const RULES: [Rule; 5] = [
    Rule {
        id: FIRST_STEP,
        threshold: Threshold::ProblemsSolved(1),
    },
    Rule {
        id: ARITHMANCER_APPRENTICE,
        threshold: Threshold::ProblemsSolved(5),
    },
    Rule {
        id: MASTER_MULTIPLIER,
        threshold: Threshold::ProblemsSolved(15),
    },
    Rule {
        id: QUEST_COMPLETE,
        threshold: Threshold::QuestsCompleted(1),
    },
    Rule {
        id: SEASONED_EXPLORER,
        threshold: Threshold::QuestsCompleted(3),
    },
];

/// Look up the rule for an achievement id.
pub fn rule_for(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.id == id)
}
