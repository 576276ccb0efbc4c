//! Procedural height field generation: clamped settings, multi-octave noise,
//! normalization and biome banding.

mod biome;
mod debug_viz;
mod heightmap;
mod seed;
mod settings;

pub use biome::{Biome, BiomeBands, BiomeThresholds, classify_biomes};
pub use debug_viz::{DebugImage, biome_color, render_biome_debug, render_heightmap_debug};
pub use heightmap::{HeightField, HeightmapSampler, MIN_SCALE, generate_height_field, inverse_lerp};
pub use seed::{OFFSET_RANGE_MAX, OFFSET_RANGE_MIN, octave_offsets, offset_rng};
pub use settings::{
    HeightMapSettings, MAX_DENSITY, MAX_MAP_SIZE, MAX_OCTAVES, MAX_PERSISTENCE, MIN_MAP_SIZE,
    MIN_OCTAVES,
};
