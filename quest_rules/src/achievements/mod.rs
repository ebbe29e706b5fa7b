//! Achievements - named milestones unlocked by crossing stat thresholds.
//!
//! The pieces:
//! - **catalog**: the fixed, ordered list of achievements, all locked
//! - **rules**: the static priority table pairing each id with a threshold
//! - **evaluate**: picks at most one newly earned achievement per call
//!
//! Evaluation never mutates anything. The caller owns the achievement list and
//! folds each result back in with [`merge_unlock`].

mod catalog;
mod rules;

pub use catalog::*;
pub use rules::*;

use serde::{Deserialize, Serialize};

use crate::stats::Stats;

/// A milestone with display metadata and a locked/unlocked flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier, unique within the catalog.
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    /// Glyph shown next to the name.
    pub icon: String,
}

impl Achievement {
    /// Create a locked achievement.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            unlocked: false,
            icon: icon.into(),
        }
    }

    /// A copy of this achievement marked as unlocked.
    pub fn unlocked_copy(&self) -> Self {
        Self {
            unlocked: true,
            ..self.clone()
        }
    }
}

/// Decide whether exactly one new achievement unlocks for `stats`.
///
/// Rules are walked in [`RULES`] order. The first rule whose achievement is
/// present in `achievements`, still locked, and whose threshold is met wins;
/// a copy of it with `unlocked = true` is returned. Later rules are not
/// considered in the same call, even if they are also satisfied.
///
/// Ids with no matching rule are ignored, so unknown input simply yields `None`.
pub fn evaluate(stats: &Stats, achievements: &[Achievement]) -> Option<Achievement> {
    RULES.iter().find_map(|rule| {
        achievements
            .iter()
            .find(|a| a.id == rule.id)
            .filter(|a| !a.unlocked && rule.threshold.is_met(stats))
            .map(Achievement::unlocked_copy)
    })
}

/// Fold an evaluation result into the caller's achievement list.
///
/// Marks every entry sharing `unlocked.id` as unlocked. Returns `true` if an
/// entry changed state; entries are never re-locked.
pub fn merge_unlock(achievements: &mut [Achievement], unlocked: &Achievement) -> bool {
    let mut changed = false;
    for achievement in achievements.iter_mut().filter(|a| a.id == unlocked.id) {
        if !achievement.unlocked {
            achievement.unlocked = true;
            changed = true;
        }
    }
    changed
}

/// Number of unlocked entries.
pub fn unlocked_count(achievements: &[Achievement]) -> usize {
    achievements.iter().filter(|a| a.unlocked).count()
}
