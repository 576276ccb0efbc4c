//! Command-line argument parsing for the terrain generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrain generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron` or a preset. Numeric
/// overrides go through the same clamping setters as every other input.
#[derive(Parser, Debug, Default)]
#[command(name = "landmass", about = "Procedural landmass generator")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Load terrain settings and palette from a preset file.
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Map width in cells (clamped to 2..=200).
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<i32>,

    /// Map length in cells (clamped to 2..=200).
    #[arg(long, allow_hyphen_values = true)]
    pub length: Option<i32>,

    /// Seed of the octave offsets.
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i32>,

    /// Noise scale.
    #[arg(long, allow_hyphen_values = true)]
    pub scale: Option<f32>,

    /// Octave count (clamped to 1..=15).
    #[arg(long, allow_hyphen_values = true)]
    pub octaves: Option<i32>,

    /// Per-octave amplitude multiplier (clamped to 0..=5).
    #[arg(long)]
    pub persistence: Option<f32>,

    /// Per-octave frequency multiplier (clamped to 0..=1).
    #[arg(long)]
    pub density: Option<f32>,

    /// Lowest elevation.
    #[arg(long, allow_hyphen_values = true)]
    pub ocean_level: Option<f32>,

    /// Highest elevation.
    #[arg(long, allow_hyphen_values = true)]
    pub cap_mountain_height: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a PNG of the vertex colors.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Write a grayscale PNG of the normalized height field.
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Write the mesh as a Wavefront OBJ file.
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Export the effective settings and palette as a preset file.
    #[arg(long)]
    pub export_preset: Option<PathBuf>,

    /// Keep running and regenerate whenever the config file changes.
    #[arg(long)]
    pub watch: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.set_map_width(w);
        }
        if let Some(l) = args.length {
            self.terrain.set_map_height(l);
        }
        if let Some(seed) = args.seed {
            self.terrain.set_seed(seed);
        }
        if let Some(scale) = args.scale {
            self.terrain.set_scale(scale);
        }
        if let Some(octaves) = args.octaves {
            self.terrain.set_octaves(octaves);
        }
        if let Some(p) = args.persistence {
            self.terrain.set_persistence(p);
        }
        if let Some(d) = args.density {
            self.terrain.set_density(d);
        }
        if let Some(level) = args.ocean_level {
            self.terrain.set_ocean_level(level);
        }
        if let Some(cap) = args.cap_mountain_height {
            self.terrain.set_cap_mountain_height(cap);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
