//! 2D debug images of generated height fields.

use std::collections::HashSet;

use crate::biome::{Biome, BiomeThresholds};
use crate::heightmap::HeightField;

/// A 2D debug image stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = HashSet::new();
        for chunk in self.pixels.chunks_exact(4) {
            colors.insert((chunk[0], chunk[1], chunk[2]));
        }
        colors.len()
    }
}

/// Grayscale image of the normalized field: black at the lowest cell, white
/// at the highest. Pixel `(x, y)` shows cell `(x, y)`.
pub fn render_heightmap_debug(field: &HeightField) -> DebugImage {
    let mut image = DebugImage::new(field.width() as u32, field.height() as u32);
    for y in 0..field.height() {
        for x in 0..field.width() {
            let v = (field.normalized(x, y) * 255.0).round() as u8;
            image.set_pixel(x as u32, y as u32, [v, v, v, 255]);
        }
    }
    image
}

/// Flat RGB color for each band.
pub fn biome_color(biome: Biome) -> [u8; 3] {
    match biome {
        Biome::Ocean => [20, 50, 180],
        Biome::Lowland => [30, 120, 30],
        Biome::Highland => [130, 110, 90],
        Biome::Peak => [235, 235, 240],
    }
}

/// Image of the band each cell falls in.
pub fn render_biome_debug(field: &HeightField, thresholds: &BiomeThresholds) -> DebugImage {
    let mut image = DebugImage::new(field.width() as u32, field.height() as u32);
    for y in 0..field.height() {
        for x in 0..field.width() {
            let [r, g, b] = biome_color(thresholds.classify(field.normalized(x, y)));
            image.set_pixel(x as u32, y as u32, [r, g, b, 255]);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::generate_height_field;
    use crate::settings::HeightMapSettings;

    fn field() -> HeightField {
        let settings =
            HeightMapSettings::new(24, 16, 3, 6.0, 0.0, 0.0, 3, 0.5, 0.9, -1000.0, 1000.0);
        generate_height_field(&settings)
    }

    #[test]
    fn test_debug_image_correct_dimensions() {
        let image = DebugImage::new(256, 128);
        assert_eq!(image.dimensions(), (256, 128));
        assert_eq!(image.pixels.len(), 256 * 128 * 4);
    }

    #[test]
    fn test_get_pixel_roundtrip() {
        let mut image = DebugImage::new(8, 8);
        image.set_pixel(2, 3, [10, 20, 30, 40]);
        assert_eq!(image.get_pixel(2, 3), [10, 20, 30, 40]);
        let idx = ((3 * 8 + 2) * 4) as usize;
        assert_eq!(&image.pixels[idx..idx + 4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_unique_color_count() {
        let mut image = DebugImage::new(4, 1);
        image.set_pixel(0, 0, [255, 0, 0, 255]);
        image.set_pixel(1, 0, [0, 255, 0, 255]);
        image.set_pixel(2, 0, [255, 0, 0, 255]); // duplicate
        image.set_pixel(3, 0, [0, 0, 255, 255]);
        assert_eq!(image.unique_color_count(), 3);
    }

    #[test]
    fn test_heightmap_image_spans_black_to_white() {
        let field = field();
        let image = render_heightmap_debug(&field);
        assert_eq!(image.dimensions(), (24, 16));

        let lows = image.pixels.chunks_exact(4).filter(|p| p[0] == 0).count();
        let highs = image.pixels.chunks_exact(4).filter(|p| p[0] == 255).count();
        assert!(lows >= 1 && highs >= 1);
        assert!(image.pixels.chunks_exact(4).all(|p| p[0] == p[1] && p[1] == p[2] && p[3] == 255));
    }

    #[test]
    fn test_biome_image_uses_band_colors() {
        let field = field();
        let thresholds = BiomeThresholds::default();
        let image = render_biome_debug(&field, &thresholds);
        let [r, g, b] = biome_color(thresholds.classify(field.normalized(5, 7)));
        assert_eq!(image.get_pixel(5, 7), [r, g, b, 255]);
        assert!(image.unique_color_count() <= 4);
    }
}
