//! Keyframed color ramps evaluated over normalized height.
//!
//! Color and alpha are keyed independently, each on its own time axis, and
//! combined only after both have been evaluated.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Linear RGBA color with `f32` channels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

static_assertions::assert_eq_size!(Color, [f32; 4]);

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(rgb: [f32; 3], a: f32) -> Self {
        Self::rgba(rgb[0], rgb[1], rgb[2], a)
    }

    /// Quantize to 8-bit RGBA, clamping each channel to `[0, 1]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// How values between two keys are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientMode {
    /// Linear interpolation between the neighboring keys.
    #[default]
    Blend,
    /// Step function: the latest key at or before `t`.
    Fixed,
}

/// An RGB key at a position on the ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorKey {
    pub color: [f32; 3],
    pub time: f32,
}

impl ColorKey {
    pub const fn new(color: [f32; 3], time: f32) -> Self {
        Self { color, time }
    }
}

/// An alpha key at a position on the ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlphaKey {
    pub alpha: f32,
    pub time: f32,
}

impl AlphaKey {
    pub const fn new(alpha: f32, time: f32) -> Self {
        Self { alpha, time }
    }
}

trait Keyframe {
    type Value: Copy;
    fn time(&self) -> f32;
    fn value(&self) -> Self::Value;
    fn lerp(a: Self::Value, b: Self::Value, f: f32) -> Self::Value;
}

impl Keyframe for ColorKey {
    type Value = [f32; 3];

    fn time(&self) -> f32 {
        self.time
    }

    fn value(&self) -> [f32; 3] {
        self.color
    }

    fn lerp(a: [f32; 3], b: [f32; 3], f: f32) -> [f32; 3] {
        [
            a[0] + (b[0] - a[0]) * f,
            a[1] + (b[1] - a[1]) * f,
            a[2] + (b[2] - a[2]) * f,
        ]
    }
}

impl Keyframe for AlphaKey {
    type Value = f32;

    fn time(&self) -> f32 {
        self.time
    }

    fn value(&self) -> f32 {
        self.alpha
    }

    fn lerp(a: f32, b: f32, f: f32) -> f32 {
        a + (b - a) * f
    }
}

/// Evaluate a non-empty, time-sorted key list at `t`.
fn evaluate_keys<K: Keyframe>(keys: &[K], t: f32, mode: GradientMode) -> K::Value {
    let next = keys.partition_point(|k| k.time() <= t);
    if next == 0 {
        return keys[0].value();
    }

    let prev = &keys[next - 1];
    if next == keys.len() || mode == GradientMode::Fixed {
        return prev.value();
    }

    // prev.time <= t < after.time, so the span is never zero.
    let after = &keys[next];
    let f = (t - prev.time()) / (after.time() - prev.time());
    K::lerp(prev.value(), after.value(), f)
}

fn clamp_time(time: f32) -> f32 {
    if time.is_nan() {
        0.0
    } else {
        time.clamp(0.0, 1.0)
    }
}

/// A color ramp built from independent color and alpha key lists.
///
/// Both lists are kept non-empty and sorted by time, with times inside
/// `[0, 1]`. An empty list is replaced by a single opaque white key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGradient", into = "RawGradient")]
pub struct ColorGradient {
    mode: GradientMode,
    color_keys: Vec<ColorKey>,
    alpha_keys: Vec<AlphaKey>,
}

impl ColorGradient {
    /// Build a gradient, sorting keys and clamping their times to `[0, 1]`.
    pub fn new(
        mode: GradientMode,
        mut color_keys: Vec<ColorKey>,
        mut alpha_keys: Vec<AlphaKey>,
    ) -> Self {
        if color_keys.is_empty() {
            tracing::warn!("gradient has no color keys, falling back to white");
            color_keys.push(ColorKey::new([1.0, 1.0, 1.0], 0.0));
        }
        if alpha_keys.is_empty() {
            tracing::warn!("gradient has no alpha keys, falling back to opaque");
            alpha_keys.push(AlphaKey::new(1.0, 0.0));
        }

        for key in &mut color_keys {
            key.time = clamp_time(key.time);
        }
        for key in &mut alpha_keys {
            key.time = clamp_time(key.time);
        }
        // Stable, so keys sharing a time keep their given order.
        color_keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        alpha_keys.sort_by(|a, b| a.time.total_cmp(&b.time));

        Self {
            mode,
            color_keys,
            alpha_keys,
        }
    }

    /// A gradient that evaluates to `color` everywhere.
    pub fn solid(color: Color) -> Self {
        Self::new(
            GradientMode::Blend,
            vec![ColorKey::new([color.r, color.g, color.b], 0.0)],
            vec![AlphaKey::new(color.a, 0.0)],
        )
    }

    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GradientMode) {
        self.mode = mode;
    }

    pub fn color_keys(&self) -> &[ColorKey] {
        &self.color_keys
    }

    pub fn alpha_keys(&self) -> &[AlphaKey] {
        &self.alpha_keys
    }

    /// Color at `t`. Values outside `[0, 1]` (and NaN, treated as 0) resolve
    /// to the boundary keys.
    pub fn evaluate(&self, t: f32) -> Color {
        let t = clamp_time(t);
        let rgb = evaluate_keys(&self.color_keys, t, self.mode);
        let alpha = evaluate_keys(&self.alpha_keys, t, self.mode);
        Color::from_rgb(rgb, alpha)
    }
}

impl Default for ColorGradient {
    /// Deep water, sand, grass, rock and snow from low to high.
    fn default() -> Self {
        Self::new(
            GradientMode::Blend,
            vec![
                ColorKey::new([0.05, 0.15, 0.45], 0.0),
                ColorKey::new([0.85, 0.8, 0.55], 0.1),
                ColorKey::new([0.2, 0.55, 0.15], 0.3),
                ColorKey::new([0.45, 0.35, 0.25], 0.7),
                ColorKey::new([0.95, 0.95, 0.97], 1.0),
            ],
            vec![AlphaKey::new(1.0, 0.0), AlphaKey::new(1.0, 1.0)],
        )
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawGradient {
    mode: GradientMode,
    color_keys: Vec<ColorKey>,
    alpha_keys: Vec<AlphaKey>,
}

impl Default for RawGradient {
    fn default() -> Self {
        ColorGradient::default().into()
    }
}

impl From<RawGradient> for ColorGradient {
    fn from(raw: RawGradient) -> Self {
        Self::new(raw.mode, raw.color_keys, raw.alpha_keys)
    }
}

impl From<ColorGradient> for RawGradient {
    fn from(g: ColorGradient) -> Self {
        Self {
            mode: g.mode,
            color_keys: g.color_keys,
            alpha_keys: g.alpha_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 3] = [1.0, 0.0, 0.0];
    const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
    const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

    fn three_stop(mode: GradientMode) -> ColorGradient {
        ColorGradient::new(
            mode,
            vec![
                ColorKey::new(RED, 0.0),
                ColorKey::new(GREEN, 0.5),
                ColorKey::new(BLUE, 1.0),
            ],
            vec![AlphaKey::new(0.0, 0.0), AlphaKey::new(1.0, 1.0)],
        )
    }

    #[test]
    fn test_boundaries_return_first_and_last_key() {
        for mode in [GradientMode::Blend, GradientMode::Fixed] {
            let g = three_stop(mode);
            assert_eq!(g.evaluate(0.0), Color::from_rgb(RED, 0.0));
            let last = g.evaluate(1.0);
            assert_eq!([last.r, last.g, last.b], BLUE);
            assert_eq!(last.a, 1.0);
        }
    }

    #[test]
    fn test_blend_interpolates_linearly() {
        let g = three_stop(GradientMode::Blend);
        let c = g.evaluate(0.25);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert!((c.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_color_and_alpha_interpolate_independently() {
        let g = ColorGradient::new(
            GradientMode::Blend,
            vec![ColorKey::new(RED, 0.0), ColorKey::new(BLUE, 1.0)],
            vec![
                AlphaKey::new(1.0, 0.0),
                AlphaKey::new(0.0, 0.2),
                AlphaKey::new(1.0, 1.0),
            ],
        );
        let c = g.evaluate(0.2);
        assert!((c.r - 0.8).abs() < 1e-6);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn test_fixed_mode_steps_to_latest_key_at_or_before() {
        let g = three_stop(GradientMode::Fixed);
        let c = g.evaluate(0.49);
        assert_eq!([c.r, c.g, c.b], RED);
        let c = g.evaluate(0.5);
        assert_eq!([c.r, c.g, c.b], GREEN);
        let c = g.evaluate(0.99);
        assert_eq!([c.r, c.g, c.b], GREEN);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn test_out_of_range_clamps_to_boundary_keys() {
        let g = ColorGradient::new(
            GradientMode::Blend,
            vec![ColorKey::new(RED, 0.2), ColorKey::new(BLUE, 0.8)],
            vec![AlphaKey::new(0.5, 0.3)],
        );
        for t in [-3.0, 0.0, 0.1, f32::NAN] {
            assert_eq!(g.evaluate(t), Color::from_rgb(RED, 0.5));
        }
        for t in [0.8, 0.95, 1.0, 42.0] {
            assert_eq!(g.evaluate(t), Color::from_rgb(BLUE, 0.5));
        }
    }

    #[test]
    fn test_fixed_mode_before_first_key_uses_first() {
        let g = ColorGradient::new(
            GradientMode::Fixed,
            vec![ColorKey::new(GREEN, 0.4), ColorKey::new(BLUE, 0.9)],
            vec![AlphaKey::new(1.0, 0.0)],
        );
        assert_eq!(g.evaluate(0.1), Color::from_rgb(GREEN, 1.0));
    }

    #[test]
    fn test_single_key_is_constant() {
        let g = ColorGradient::solid(Color::rgba(0.3, 0.6, 0.9, 0.5));
        for t in [0.0, 0.33, 0.5, 1.0] {
            assert_eq!(g.evaluate(t), Color::rgba(0.3, 0.6, 0.9, 0.5));
        }
    }

    #[test]
    fn test_keys_sorted_and_times_clamped() {
        let g = ColorGradient::new(
            GradientMode::Blend,
            vec![
                ColorKey::new(BLUE, 3.0),
                ColorKey::new(RED, -1.0),
                ColorKey::new(GREEN, 0.5),
            ],
            vec![AlphaKey::new(1.0, 0.7), AlphaKey::new(0.0, 0.1)],
        );
        let times: Vec<f32> = g.color_keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert_eq!(g.color_keys()[0].color, RED);
        assert_eq!(g.alpha_keys()[0].time, 0.1);
    }

    #[test]
    fn test_empty_key_lists_fall_back_to_opaque_white() {
        let g = ColorGradient::new(GradientMode::Blend, Vec::new(), Vec::new());
        assert_eq!(g.evaluate(0.7), Color::WHITE);
    }

    #[test]
    fn test_duplicate_times_do_not_divide_by_zero() {
        let g = ColorGradient::new(
            GradientMode::Blend,
            vec![
                ColorKey::new(RED, 0.5),
                ColorKey::new(GREEN, 0.5),
                ColorKey::new(BLUE, 1.0),
            ],
            vec![AlphaKey::new(1.0, 0.0)],
        );
        let c = g.evaluate(0.5);
        assert_eq!([c.r, c.g, c.b], GREEN);
        assert!(g.evaluate(0.75).r.is_finite());
    }

    #[test]
    fn test_ron_roundtrip_and_sorting_on_load() {
        let ron_str = "(
            mode: Fixed,
            color_keys: [
                (color: (0.0, 0.0, 1.0), time: 1.0),
                (color: (1.0, 0.0, 0.0), time: 0.0),
            ],
            alpha_keys: [(alpha: 1.0, time: 0.0)],
        )";
        let g: ColorGradient = ron::from_str(ron_str).unwrap();
        assert_eq!(g.mode(), GradientMode::Fixed);
        assert_eq!(g.color_keys()[0].color, RED);

        let back: ColorGradient = ron::from_str(&ron::to_string(&g).unwrap()).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::rgba(-1.0, 0.5, 2.0, 0.0).to_rgba8(), [0, 128, 255, 0]);
    }
}
