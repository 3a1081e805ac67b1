//! Configuration system for the grotto generator.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! with CLI overrides via clap and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CavesConfig, Config, DebugConfig, FloorConfig, WorldConfig};
pub use error::ConfigError;
