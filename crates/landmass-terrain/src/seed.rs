//! Deterministic octave offsets derived from the settings seed.
//!
//! The seed only drives these offsets; the noise primitive itself is fixed.
//! Changing the draw order changes every generated map for a given seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::settings::HeightMapSettings;

/// Lower bound (inclusive) of the random part of an octave offset.
pub const OFFSET_RANGE_MIN: i32 = -100_000;
/// Upper bound (exclusive) of the random part of an octave offset.
pub const OFFSET_RANGE_MAX: i32 = 100_000;

/// Build the generator used for octave offsets.
pub fn offset_rng(seed: i32) -> ChaCha8Rng {
    // Sign-extend so negative seeds stay distinct from large positive ones.
    ChaCha8Rng::seed_from_u64(seed as i64 as u64)
}

/// Draw one `[x, y]` offset per octave.
///
/// For each octave the x component is drawn before the y component, and the
/// settings' scale offsets are added afterwards.
pub fn octave_offsets(settings: &HeightMapSettings) -> Vec<[f64; 2]> {
    let mut rng = offset_rng(settings.seed());
    (0..settings.octaves())
        .map(|_| {
            let x = rng.random_range(OFFSET_RANGE_MIN..OFFSET_RANGE_MAX) as f64
                + settings.scale_offset_x() as f64;
            let y = rng.random_range(OFFSET_RANGE_MIN..OFFSET_RANGE_MAX) as f64
                + settings.scale_offset_y() as f64;
            [x, y]
        })
        .collect()
}
