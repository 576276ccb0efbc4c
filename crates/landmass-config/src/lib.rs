//! Configuration system for the landmass generator.
//!
//! Provides generator settings that persist to disk as RON files, portable
//! terrain presets, CLI overrides via clap, and hot-reload detection.

mod cli;
mod config;
mod error;
mod preset;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig};
pub use error::ConfigError;
pub use preset::{PRESET_EXTENSION, TerrainPreset};
