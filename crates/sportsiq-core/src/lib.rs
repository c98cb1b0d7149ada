//! sportsiq-core — Scoring, stats, achievements and persistence.
//!
//! This crate holds the quiz data model and the pure game rules, plus the
//! local store that keeps high scores, lifetime stats, unlocked achievements
//! and preferences between runs.

pub mod achievements;
pub mod error;
pub mod model;
pub mod preferences;
pub mod recorder;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod store;
pub mod traits;
