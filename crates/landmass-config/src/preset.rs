//! Terrain presets: a portable snapshot of the settings and palette that can
//! be exported to and imported from a single RON file.

use std::path::Path;

use landmass_mesh::ColorGradient;
use landmass_terrain::HeightMapSettings;
use serde::{Deserialize, Serialize};

use crate::config::{Config, pretty_config};
use crate::error::ConfigError;

/// Conventional extension of preset files.
pub const PRESET_EXTENSION: &str = "lmg";

/// Everything needed to reproduce a terrain elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainPreset {
    pub auto_update: bool,
    pub show_vertices: bool,
    pub terrain: HeightMapSettings,
    pub palette: ColorGradient,
}

impl TerrainPreset {
    /// Write the preset to `path` as pretty RON, creating parent directories.
    pub fn export(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let serialized =
            ron::ser::to_string_pretty(self, pretty_config()).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        log::info!("Exported terrain preset to {}", path.display());
        Ok(())
    }

    /// Read a preset from `path`.
    pub fn import(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let preset: TerrainPreset = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        log::info!("Imported terrain preset from {}", path.display());
        Ok(preset)
    }
}

impl Config {
    /// Snapshot the preset-relevant parts of this config.
    pub fn preset(&self) -> TerrainPreset {
        TerrainPreset {
            auto_update: self.generation.auto_update,
            show_vertices: self.generation.show_vertices,
            terrain: self.terrain.clone(),
            palette: self.palette.clone(),
        }
    }

    /// Replace settings, palette and toggles with those of `preset`.
    pub fn apply_preset(&mut self, preset: TerrainPreset) {
        self.generation.auto_update = preset.auto_update;
        self.generation.show_vertices = preset.show_vertices;
        self.terrain = preset.terrain;
        self.palette = preset.palette;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmass_mesh::{AlphaKey, ColorKey, GradientMode};

    fn custom_preset() -> TerrainPreset {
        let mut terrain = HeightMapSettings::default();
        terrain.set_seed(-5).set_scale(17.5).set_octaves(9);
        TerrainPreset {
            auto_update: false,
            show_vertices: true,
            terrain,
            palette: ColorGradient::new(
                GradientMode::Fixed,
                vec![ColorKey::new([0.1, 0.2, 0.3], 0.0), ColorKey::new([0.9, 0.8, 0.7], 0.6)],
                vec![AlphaKey::new(0.5, 0.0)],
            ),
        }
    }

    #[test]
    fn test_export_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("island.lmg");
        let preset = custom_preset();

        preset.export(&path).unwrap();
        let imported = TerrainPreset::import(&path).unwrap();
        assert_eq!(preset, imported);
    }

    #[test]
    fn test_import_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TerrainPreset::import(&dir.path().join("nope.lmg"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_import_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.lmg");
        std::fs::write(&path, "(terrain: [oops").unwrap();
        assert!(matches!(TerrainPreset::import(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_apply_preset_replaces_terrain_and_palette() {
        let mut config = Config::default();
        let preset = custom_preset();
        config.apply_preset(preset.clone());

        assert_eq!(config.terrain, preset.terrain);
        assert_eq!(config.palette, preset.palette);
        assert!(!config.generation.auto_update);
        assert!(config.generation.show_vertices);
        assert_eq!(config.preset(), preset);
    }

    #[test]
    fn test_preset_leaves_other_sections_alone() {
        let mut config = Config::default();
        config.debug.log_level = "trace".to_string();
        config.generation.classify_biomes = false;
        config.apply_preset(custom_preset());
        assert_eq!(config.debug.log_level, "trace");
        assert!(!config.generation.classify_biomes);
    }
}
