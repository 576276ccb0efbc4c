//! `landmass`: procedural landmass generator.
//!
//! Loads `config.ron` (creating it on first run), layers an optional preset
//! and CLI overrides on top, generates the height field and mesh, and writes
//! whichever artifacts were requested. With `--watch` it keeps polling the
//! config file and regenerates on every change.
//!
//! Run with: `cargo run -p landmass-app -- --preview terrain.png`

mod error;
mod export;
mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use landmass_config::{CONFIG_FILE_NAME, CliArgs, Config, PRESET_EXTENSION, TerrainPreset};
use landmass_mesh::{generate_terrain, render_color_preview};
use landmass_terrain::{Biome, classify_biomes, render_heightmap_debug};
use tracing::{error, info, trace, warn};

use crate::error::{AppError, ExportError};
use crate::platform::PlatformDirs;

/// How often watch mode re-reads the config file.
const WATCH_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match resolve_dirs(args) {
        Ok(dirs) => dirs,
        Err(e) => {
            // No log directory yet; console output still reports the failure.
            landmass_log::init_logging(None, false, None);
            return Err(e);
        }
    };

    // Loading happens before the subscriber exists, so its outcome is
    // reported once logging is up.
    let loaded = LoadedConfig::load(&dirs.config_dir, args);
    let log_config = loaded.as_ref().ok().map(|l| &l.config);
    landmass_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), log_config);
    let loaded = loaded?;

    info!("Landmass generator");
    loaded.log_sources(&dirs.config_dir, args);

    generate_and_export(&loaded.config, args)?;

    if let Some(path) = &args.export_preset {
        loaded.config.preset().export(&preset_path(path))?;
    }

    if args.watch {
        watch(&dirs.config_dir, loaded.file_config, loaded.preset.as_ref(), args);
    }

    Ok(())
}

fn resolve_dirs(args: &CliArgs) -> Result<PlatformDirs, AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;
    Ok(dirs)
}

/// The config layers of one run.
struct LoadedConfig {
    /// Contents of `config.ron`, before preset and CLI overrides.
    file_config: Config,
    preset: Option<TerrainPreset>,
    /// What generation actually uses.
    config: Config,
    /// `config.ron` did not exist and was written with defaults.
    created: bool,
}

impl LoadedConfig {
    fn load(config_dir: &Path, args: &CliArgs) -> Result<Self, AppError> {
        let created = !config_dir.join(CONFIG_FILE_NAME).exists();
        let file_config = Config::load_or_create(config_dir)?;
        let preset = args
            .preset
            .as_deref()
            .map(TerrainPreset::import)
            .transpose()?;
        let config = effective_config(&file_config, preset.as_ref(), args);

        Ok(Self {
            file_config,
            preset,
            config,
            created,
        })
    }

    fn log_sources(&self, config_dir: &Path, args: &CliArgs) {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if self.created {
            info!("Created default config at {}", config_path.display());
        } else {
            info!("Loaded config from {}", config_path.display());
        }
        if let Some(path) = &args.preset {
            info!("Imported terrain preset from {}", path.display());
        }
    }
}

/// Layer the preset (if any) and then the CLI overrides over the file config.
fn effective_config(
    file_config: &Config,
    preset: Option<&TerrainPreset>,
    args: &CliArgs,
) -> Config {
    let mut config = file_config.clone();
    if let Some(preset) = preset {
        config.apply_preset(preset.clone());
    }
    config.apply_cli_overrides(args);
    config
}

/// Append the preset extension when the user gave none.
fn preset_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PRESET_EXTENSION)
    }
}

fn generate_and_export(config: &Config, args: &CliArgs) -> Result<(), ExportError> {
    let started = Instant::now();
    let (field, mesh) = generate_terrain(&config.terrain, &config.palette);

    info!(
        width = field.width(),
        length = field.height(),
        seed = config.terrain.seed(),
        min_height = field.min_height(),
        max_height = field.max_height(),
        triangles = mesh.triangle_count(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "generated terrain"
    );
    if field.is_flat() {
        warn!("height field is flat; every cell normalizes to 0");
    }

    if config.generation.show_vertices {
        for (index, v) in mesh.surface_vertices().iter().enumerate() {
            trace!(index, x = v[0], height = v[1], z = v[2], "vertex");
        }
    }

    if config.generation.classify_biomes {
        let bands = classify_biomes(&field, &config.biomes);
        for biome in Biome::ALL {
            info!(biome = biome.name(), cells = bands.get(biome).len(), "biome band");
        }
    }

    if let Some(path) = &args.preview {
        export::save_image(&render_color_preview(&mesh), path)?;
    }
    if let Some(path) = &args.heightmap {
        export::save_image(&render_heightmap_debug(&field), path)?;
    }
    if let Some(path) = &args.obj {
        export::save_obj(&mesh, path)?;
    }

    Ok(())
}

/// Poll the config file and regenerate whenever its contents change.
///
/// Runs until `auto_update` is switched off in the file or the process is
/// interrupted. Reload and export failures are logged and the loop continues.
fn watch(
    config_dir: &Path,
    mut file_config: Config,
    preset: Option<&TerrainPreset>,
    args: &CliArgs,
) {
    if !effective_config(&file_config, preset, args).generation.auto_update {
        warn!("auto_update is disabled; not watching for changes");
        return;
    }

    info!("Watching {} for changes", config_dir.display());
    loop {
        std::thread::sleep(WATCH_INTERVAL);

        match file_config.reload(config_dir) {
            Ok(Some(new_config)) => {
                file_config = new_config;
                let config = effective_config(&file_config, preset, args);
                if !config.generation.auto_update {
                    info!("auto_update switched off; stopping watch");
                    return;
                }
                if let Err(e) = generate_and_export(&config, args) {
                    error!("regeneration failed: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => warn!("config reload failed: {e}"),
        }
    }
}
