//! # Quest Rules
//!
//! The rulebook for Aethelgard's Echoes - session statistics, the achievement
//! catalog and its unlock rules, and the multiplication-puzzle model.
//! This crate holds no I/O and no AI logic; everything here is a pure function
//! of the values passed in.

pub mod achievements;
pub mod adventure;
pub mod stats;

pub use achievements::*;
pub use adventure::*;
pub use stats::*;
