//! Transient unlock notifications and sound cues.

use quest_rules::Achievement;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A toast announcing a freshly unlocked achievement.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub achievement: Achievement,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(achievement: Achievement, now: Instant, duration: Duration) -> Self {
        Self {
            achievement,
            expires_at: now + duration,
        }
    }

    /// Whether the toast should still be on screen at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Sounds the UI is asked to play. The session only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Start,
    Correct,
    Incorrect,
    Choice,
    GameOver,
}
