//! Configuration system for the Terra world generator.
//!
//! Provides the map-level configuration object with named defaults, RON
//! persistence, CLI overrides via clap, hot-reload detection, and fail-fast
//! validation of settings that would otherwise corrupt chunk boundaries.

mod cli;
mod config;
pub mod defaults;
mod error;
mod validate;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, CaveConfig, Config, DebugConfig, TerrainConfig, WorldConfig};
pub use error::ConfigError;
