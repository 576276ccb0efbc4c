//! Top-down image of a terrain mesh's vertex colors.

use landmass_terrain::DebugImage;

use crate::terrain_mesh::TerrainMesh;

/// One pixel per populated vertex: pixel `(x, y)` shows vertex `(x, y)`.
pub fn render_color_preview(mesh: &TerrainMesh) -> DebugImage {
    let mut image = DebugImage::new(mesh.width() as u32, mesh.length() as u32);
    for x in 0..mesh.width() {
        for y in 0..mesh.length() {
            let color = mesh.colors[mesh.vertex_index(x, y)];
            image.set_pixel(x as u32, y as u32, color.to_rgba8());
        }
    }
    image
}
