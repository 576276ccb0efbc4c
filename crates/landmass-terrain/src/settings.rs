//! Height map generation settings.
//!
//! Every setter clamps its input to the documented range before storing it, so
//! a [`HeightMapSettings`] value can never hold an out-of-range parameter. Values
//! that had to be clamped are reported at `debug` level.

use serde::{Deserialize, Serialize};

/// Smallest allowed map width / height.
pub const MIN_MAP_SIZE: u32 = 2;
/// Largest allowed map width / height.
pub const MAX_MAP_SIZE: u32 = 200;
/// Smallest allowed octave count.
pub const MIN_OCTAVES: u32 = 1;
/// Largest allowed octave count.
pub const MAX_OCTAVES: u32 = 15;
/// Upper bound of the per-octave amplitude multiplier.
pub const MAX_PERSISTENCE: f32 = 5.0;
/// Upper bound of the per-octave frequency multiplier.
pub const MAX_DENSITY: f32 = 1.0;

/// Parameters for one height map generation run.
///
/// Fields are private: reads go through getters, writes through clamping
/// setters. Deserialization routes through the same setters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSettings", into = "RawSettings")]
pub struct HeightMapSettings {
    map_width: u32,
    map_height: u32,
    seed: i32,
    scale: f32,
    scale_offset_x: f32,
    scale_offset_y: f32,
    octaves: u32,
    persistence: f32,
    density: f32,
    ocean_level: f32,
    cap_mountain_height: f32,
}

impl Default for HeightMapSettings {
    fn default() -> Self {
        Self {
            map_width: 200,
            map_height: 200,
            seed: 0,
            scale: 4.0,
            scale_offset_x: 0.0,
            scale_offset_y: 0.0,
            octaves: 6,
            persistence: 2.0,
            density: 0.45,
            ocean_level: 0.0,
            cap_mountain_height: 200.0,
        }
    }
}

/// Counts arrive signed so a negative file or CLI value clamps up to `min`
/// instead of failing to parse.
fn clamp_count(name: &str, value: i32, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(min as i32, max as i32);
    if clamped != value {
        tracing::debug!(setting = name, value, clamped, "settings value clamped");
    }
    clamped as u32
}

fn clamp_f32(name: &str, value: f32, min: f32, max: f32) -> f32 {
    // NaN falls to the lower bound.
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped != value {
        tracing::debug!(setting = name, value, clamped, "settings value clamped");
    }
    clamped
}

impl HeightMapSettings {
    /// Build settings from raw values, clamping each one.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        map_width: i32,
        map_height: i32,
        seed: i32,
        scale: f32,
        scale_offset_x: f32,
        scale_offset_y: f32,
        octaves: i32,
        persistence: f32,
        density: f32,
        ocean_level: f32,
        cap_mountain_height: f32,
    ) -> Self {
        let mut settings = Self::default();
        settings.set_map_width(map_width);
        settings.set_map_height(map_height);
        settings.set_seed(seed);
        settings.set_scale(scale);
        settings.set_scale_offset_x(scale_offset_x);
        settings.set_scale_offset_y(scale_offset_y);
        settings.set_octaves(octaves);
        settings.set_persistence(persistence);
        settings.set_density(density);
        settings.set_ocean_level(ocean_level);
        settings.set_cap_mountain_height(cap_mountain_height);
        settings
    }

    /// Number of grid columns (x axis).
    pub fn map_width(&self) -> u32 {
        self.map_width
    }

    /// Set the number of grid columns, clamped to `[2, 200]`.
    pub fn set_map_width(&mut self, value: i32) -> &mut Self {
        self.map_width = clamp_count("map_width", value, MIN_MAP_SIZE, MAX_MAP_SIZE);
        self
    }

    /// Number of grid rows (y axis, the "length" of the terrain).
    pub fn map_height(&self) -> u32 {
        self.map_height
    }

    /// Set the number of grid rows, clamped to `[2, 200]`.
    pub fn set_map_height(&mut self, value: i32) -> &mut Self {
        self.map_height = clamp_count("map_height", value, MIN_MAP_SIZE, MAX_MAP_SIZE);
        self
    }

    /// Seed of the octave-offset generator.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn set_seed(&mut self, value: i32) -> &mut Self {
        self.seed = value;
        self
    }

    /// Noise scale. Not clamped here; generation substitutes a small epsilon
    /// for non-positive values.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, value: f32) -> &mut Self {
        self.scale = value;
        self
    }

    pub fn scale_offset_x(&self) -> f32 {
        self.scale_offset_x
    }

    pub fn set_scale_offset_x(&mut self, value: f32) -> &mut Self {
        self.scale_offset_x = value;
        self
    }

    pub fn scale_offset_y(&self) -> f32 {
        self.scale_offset_y
    }

    pub fn set_scale_offset_y(&mut self, value: f32) -> &mut Self {
        self.scale_offset_y = value;
        self
    }

    /// Number of noise layers summed per cell.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Set the octave count, clamped to `[1, 15]`.
    pub fn set_octaves(&mut self, value: i32) -> &mut Self {
        self.octaves = clamp_count("octaves", value, MIN_OCTAVES, MAX_OCTAVES);
        self
    }

    /// Per-octave amplitude multiplier.
    pub fn persistence(&self) -> f32 {
        self.persistence
    }

    /// Set the amplitude multiplier, clamped to `[0, 5]`.
    pub fn set_persistence(&mut self, value: f32) -> &mut Self {
        self.persistence = clamp_f32("persistence", value, 0.0, MAX_PERSISTENCE);
        self
    }

    /// Per-octave frequency multiplier.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Set the frequency multiplier, clamped to `[0, 1]`.
    pub fn set_density(&mut self, value: f32) -> &mut Self {
        self.density = clamp_f32("density", value, 0.0, MAX_DENSITY);
        self
    }

    /// Lowest elevation a cell may take.
    pub fn ocean_level(&self) -> f32 {
        self.ocean_level
    }

    pub fn set_ocean_level(&mut self, value: f32) -> &mut Self {
        self.ocean_level = value;
        self
    }

    /// Highest elevation a cell may take.
    pub fn cap_mountain_height(&self) -> f32 {
        self.cap_mountain_height
    }

    pub fn set_cap_mountain_height(&mut self, value: f32) -> &mut Self {
        self.cap_mountain_height = value;
        self
    }

    /// Total number of grid cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.map_width as usize * self.map_height as usize
    }
}

/// On-disk shape of [`HeightMapSettings`]. Missing fields take the defaults.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawSettings {
    map_width: i32,
    map_height: i32,
    seed: i32,
    scale: f32,
    scale_offset_x: f32,
    scale_offset_y: f32,
    octaves: i32,
    persistence: f32,
    density: f32,
    ocean_level: f32,
    cap_mountain_height: f32,
}

impl Default for RawSettings {
    fn default() -> Self {
        HeightMapSettings::default().into()
    }
}

impl From<RawSettings> for HeightMapSettings {
    fn from(raw: RawSettings) -> Self {
        Self::new(
            raw.map_width,
            raw.map_height,
            raw.seed,
            raw.scale,
            raw.scale_offset_x,
            raw.scale_offset_y,
            raw.octaves,
            raw.persistence,
            raw.density,
            raw.ocean_level,
            raw.cap_mountain_height,
        )
    }
}

impl From<HeightMapSettings> for RawSettings {
    fn from(s: HeightMapSettings) -> Self {
        Self {
            map_width: s.map_width as i32,
            map_height: s.map_height as i32,
            seed: s.seed,
            scale: s.scale,
            scale_offset_x: s.scale_offset_x,
            scale_offset_y: s.scale_offset_y,
            octaves: s.octaves as i32,
            persistence: s.persistence,
            density: s.density,
            ocean_level: s.ocean_level,
            cap_mountain_height: s.cap_mountain_height,
        }
    }
}
