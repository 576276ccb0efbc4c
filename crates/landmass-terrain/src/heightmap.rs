//! Multi-octave noise height field generation.
//!
//! Composites several octaves of 2D Perlin noise per grid cell, clamps the sum
//! to the ocean floor / mountain cap, and rescales the result to `[0, 1]` using
//! the extremes actually observed in the run.

use noise::{NoiseFn, Perlin};

use crate::seed::octave_offsets;
use crate::settings::HeightMapSettings;

/// Scale substituted when the configured scale is not strictly positive.
pub const MIN_SCALE: f64 = 0.0001;

/// Seed of the noise primitive. The settings seed only moves the octave
/// offsets, so every map samples the same underlying noise.
const NOISE_SEED: u32 = Perlin::DEFAULT_SEED;

/// Perlin's permutation table repeats every 256 lattice cells.
const NOISE_PERIOD: f64 = 256.0;

/// Fold a sample coordinate into one noise period.
///
/// The fractional part is preserved exactly, so the sampled value is
/// unchanged, but huge coordinates (tiny scales, large offsets) no longer
/// overflow the lattice index. Non-finite coordinates sample the origin.
fn wrap_coordinate(c: f64) -> f64 {
    if c.is_finite() {
        c.rem_euclid(NOISE_PERIOD)
    } else {
        0.0
    }
}

/// Samples the raw (unclamped) fractal sum for individual grid cells.
///
/// Holds everything derived from the settings once per run: octave offsets,
/// effective scale and grid center.
pub struct HeightmapSampler {
    noise: Perlin,
    offsets: Vec<[f64; 2]>,
    scale: f64,
    half_width: f64,
    half_height: f64,
    persistence: f64,
    density: f64,
}

impl HeightmapSampler {
    /// Prepare a sampler for the given settings.
    pub fn new(settings: &HeightMapSettings) -> Self {
        let scale = settings.scale() as f64;
        // `!(scale > 0)` also catches NaN.
        let scale = if scale > 0.0 { scale } else { MIN_SCALE };

        Self {
            noise: Perlin::new(NOISE_SEED),
            offsets: octave_offsets(settings),
            scale,
            half_width: settings.map_width() as f64 / 2.0,
            half_height: settings.map_height() as f64 / 2.0,
            persistence: settings.persistence() as f64,
            density: settings.density() as f64,
        }
    }

    /// Sum all octaves for grid cell `(x, y)`.
    ///
    /// Each octave contributes a signed Perlin sample in `[-1, 1]` times its
    /// amplitude; amplitude is then multiplied by persistence and frequency
    /// by density.
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;

        for offset in &self.offsets {
            let nx = (x as f64 - self.half_width) / self.scale * frequency + offset[0];
            let ny = (y as f64 - self.half_height) / self.scale * frequency + offset[1];
            total += self.noise.get([wrap_coordinate(nx), wrap_coordinate(ny)]) * amplitude;

            amplitude *= self.persistence;
            frequency *= self.density;
        }

        total
    }

    /// Geometric sum of all octave amplitudes, an upper bound on `|sample|`.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in &self.offsets {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }

    /// The scale actually used, after the non-positive substitution.
    pub fn effective_scale(&self) -> f64 {
        self.scale
    }
}

/// Real and normalized elevations for a `width x height` grid.
///
/// Both grids are stored width-major: cell `(x, y)` lives at `x * height + y`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    real: Vec<f32>,
    normalized: Vec<f32>,
    min_height: f32,
    max_height: f32,
}

impl HeightField {
    /// Grid width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Linear index of cell `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    /// Clamped elevation at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn real(&self, x: usize, y: usize) -> f32 {
        self.real[self.index(x, y)]
    }

    /// Elevation at `(x, y)` rescaled to `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid.
    pub fn normalized(&self, x: usize, y: usize) -> f32 {
        self.normalized[self.index(x, y)]
    }

    pub fn real_values(&self) -> &[f32] {
        &self.real
    }

    pub fn normalized_values(&self) -> &[f32] {
        &self.normalized
    }

    /// Lowest elevation observed in this run.
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    /// Highest elevation observed in this run.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// `true` when every cell has the same elevation.
    pub fn is_flat(&self) -> bool {
        self.min_height == self.max_height
    }
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns 0 when `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Raise to `ocean_level`, then cap at `cap_mountain_height`.
///
/// When the bounds are inverted the cap wins. `f32::clamp` is avoided since it
/// panics on inverted bounds.
fn clamp_elevation(value: f32, ocean_level: f32, cap_mountain_height: f32) -> f32 {
    let mut h = value;
    if h < ocean_level {
        h = ocean_level;
    }
    if h > cap_mountain_height {
        h = cap_mountain_height;
    }
    h
}

/// Generate the real and normalized height fields for `settings`.
///
/// Deterministic: identical settings always yield bit-identical fields.
pub fn generate_height_field(settings: &HeightMapSettings) -> HeightField {
    let sampler = HeightmapSampler::new(settings);
    let width = settings.map_width() as usize;
    let height = settings.map_height() as usize;
    let ocean_level = settings.ocean_level();
    let cap = settings.cap_mountain_height();

    let mut real = vec![0.0_f32; width * height];
    let mut min_height = f32::MAX;
    let mut max_height = f32::MIN;

    for y in 0..height {
        for x in 0..width {
            let h = clamp_elevation(sampler.sample(x, y) as f32, ocean_level, cap);
            if h > max_height {
                max_height = h;
            }
            if h < min_height {
                min_height = h;
            }
            real[x * height + y] = h;
        }
    }

    let normalized = real
        .iter()
        .map(|&h| inverse_lerp(min_height, max_height, h))
        .collect();

    tracing::debug!(
        width,
        height,
        octaves = settings.octaves(),
        seed = settings.seed(),
        max_amplitude = sampler.max_amplitude(),
        min_height,
        max_height,
        "generated height field"
    );

    HeightField {
        width,
        height,
        real,
        normalized,
        min_height,
        max_height,
    }
}
