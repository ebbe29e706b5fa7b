//! # Story Core
//!
//! The storyteller behind Aethelgard's Echoes. This crate talks to the
//! language model that writes each story step and owns the game session that
//! ties the story, the puzzles, and `quest_rules` together.
//!
//! ## Core Components
//!
//! - **prompt**: Game-master instructions, per-turn prompts, and reply validation
//! - **client**: The `StoryGenerator` seam and its Gemini implementation
//! - **session**: The explicit game state driven by player events
//! - **config**: TOML configuration for the model and the session
//!
//! ## Design Philosophy
//!
//! - **Rules stay pure**: Achievements and stats are decided by `quest_rules`; this crate only feeds them snapshots
//! - **Fail once, loudly**: A failed story request is logged and shown to the player, never retried
//! - **Caller owns the clock**: Time-based behavior takes `now` as an argument

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod session;

pub use client::*;
pub use config::*;
pub use error::*;
pub use prompt::*;
pub use session::*;
