//! sportsiq-sources — Question-bank integrations.
//!
//! Implements the `QuestionSource` trait for the Open Trivia Database and for
//! a local JSON question bank, and loads the TOML configuration that picks
//! between them.

pub mod config;
pub mod error;
pub mod file;
pub mod mock;
pub mod opentdb;

pub use config::{
    create_source, load_config, load_config_from, resolve_data_dir, SourceConfig, TriviaConfig,
};
pub use error::SourceError;
