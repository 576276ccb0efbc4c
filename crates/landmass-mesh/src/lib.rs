//! Terrain meshing: color ramps, grid triangulation and vertex normals.

pub mod gradient;
pub mod preview;
pub mod terrain_mesh;

pub use gradient::{AlphaKey, Color, ColorGradient, ColorKey, GradientMode};
pub use preview::render_color_preview;
pub use terrain_mesh::{TerrainMesh, compute_normals, triangulate_grid};

use landmass_terrain::{HeightField, HeightMapSettings, generate_height_field};

/// Generate the height field for `settings` and triangulate it.
///
/// Every call starts from scratch; nothing is cached between calls.
pub fn generate_terrain(
    settings: &HeightMapSettings,
    gradient: &ColorGradient,
) -> (HeightField, TerrainMesh) {
    let field = generate_height_field(settings);
    let mesh = TerrainMesh::build(&field, gradient);
    (field, mesh)
}
