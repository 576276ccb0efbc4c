//! Coarse biome bands by normalized height, used to place decorations.

use serde::{Deserialize, Serialize};

use crate::heightmap::HeightField;

/// Upper (exclusive) normalized-height bounds of the first three bands.
/// Anything at or above `highland` is a peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeThresholds {
    pub ocean: f32,
    pub lowland: f32,
    pub highland: f32,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            ocean: 0.08,
            lowland: 0.55,
            highland: 0.95,
        }
    }
}

/// One of the four height bands, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Ocean,
    Lowland,
    Highland,
    Peak,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Ocean, Biome::Lowland, Biome::Highland, Biome::Peak];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::Lowland => "lowland",
            Biome::Highland => "highland",
            Biome::Peak => "peak",
        }
    }
}

impl BiomeThresholds {
    /// Band for a normalized height. Bounds are checked in ascending order.
    pub fn classify(&self, normalized: f32) -> Biome {
        if normalized < self.ocean {
            Biome::Ocean
        } else if normalized < self.lowland {
            Biome::Lowland
        } else if normalized < self.highland {
            Biome::Highland
        } else {
            Biome::Peak
        }
    }
}

/// Cell positions per band, each stored as `[x, real_height, y]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeBands {
    pub ocean: Vec<[f32; 3]>,
    pub lowland: Vec<[f32; 3]>,
    pub highland: Vec<[f32; 3]>,
    pub peak: Vec<[f32; 3]>,
}

impl BiomeBands {
    pub fn get(&self, biome: Biome) -> &[[f32; 3]] {
        match biome {
            Biome::Ocean => &self.ocean,
            Biome::Lowland => &self.lowland,
            Biome::Highland => &self.highland,
            Biome::Peak => &self.peak,
        }
    }

    fn get_mut(&mut self, biome: Biome) -> &mut Vec<[f32; 3]> {
        match biome {
            Biome::Ocean => &mut self.ocean,
            Biome::Lowland => &mut self.lowland,
            Biome::Highland => &mut self.highland,
            Biome::Peak => &mut self.peak,
        }
    }

    /// Total number of classified cells.
    pub fn len(&self) -> usize {
        Biome::ALL.iter().map(|&b| self.get(b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition every cell of `field` into its band.
///
/// Cells are visited row by row (y outer, x inner), so each band lists its
/// positions in that order.
pub fn classify_biomes(field: &HeightField, thresholds: &BiomeThresholds) -> BiomeBands {
    let mut bands = BiomeBands::default();
    for y in 0..field.height() {
        for x in 0..field.width() {
            let biome = thresholds.classify(field.normalized(x, y));
            bands
                .get_mut(biome)
                .push([x as f32, field.real(x, y), y as f32]);
        }
    }

    tracing::debug!(
        ocean = bands.ocean.len(),
        lowland = bands.lowland.len(),
        highland = bands.highland.len(),
        peak = bands.peak.len(),
        "classified biome bands"
    );

    bands
}
