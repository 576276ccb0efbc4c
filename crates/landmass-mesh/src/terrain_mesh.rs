//! Regular-grid terrain mesh: one vertex per height field cell, two triangles
//! per grid quad.
//!
//! ## Layout
//!
//! Vertex and color buffers are allocated with `(W + 1) * (L + 1)` slots but
//! only the first `W * L` are written; the remainder stays zeroed. Vertex
//! `(x, y)` lives at `x * L + y`. The triangle buffer has `W * L * 6` slots,
//! of which the first `(W - 1) * (L - 1) * 6` hold quads; the tail stays zero
//! (degenerate triangles on vertex 0).

use glam::Vec3;
use landmass_terrain::HeightField;

use crate::gradient::{Color, ColorGradient};

/// Mesh output of a terrain triangulation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    width: usize,
    length: usize,
    /// Vertex positions `(x, height, y)`.
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex colors from the gradient.
    pub colors: Vec<Color>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub triangles: Vec<u32>,
    /// Area-weighted vertex normals, one per vertex slot.
    pub normals: Vec<[f32; 3]>,
}

impl TerrainMesh {
    /// Triangulate `field`, coloring each vertex by its normalized height.
    pub fn build(field: &HeightField, gradient: &ColorGradient) -> Self {
        let width = field.width();
        let length = field.height();
        let capacity = (width + 1) * (length + 1);

        let mut vertices = vec![[0.0_f32; 3]; capacity];
        let mut colors = vec![Color::default(); capacity];

        let mut idx = 0;
        for x in 0..width {
            for y in 0..length {
                vertices[idx] = [x as f32, field.real(x, y), y as f32];
                colors[idx] = gradient.evaluate(field.normalized(x, y));
                idx += 1;
            }
        }

        let triangles = triangulate_grid(width, length);
        let normals = compute_normals(&vertices, &triangles);

        tracing::debug!(
            width,
            length,
            vertices = width * length,
            triangles = quad_count(width, length) * 2,
            "built terrain mesh"
        );

        Self {
            width,
            length,
            vertices,
            colors,
            triangles,
            normals,
        }
    }

    /// Grid width `W` (vertex columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid length `L` (vertices per column).
    pub fn length(&self) -> usize {
        self.length
    }

    /// Linear index of vertex `(x, y)`.
    pub fn vertex_index(&self, x: usize, y: usize) -> usize {
        x * self.length + y
    }

    /// Number of written vertex slots (`W * L`).
    pub fn populated_vertex_count(&self) -> usize {
        self.width * self.length
    }

    /// The written vertex positions, excluding the zeroed border slots.
    pub fn surface_vertices(&self) -> &[[f32; 3]] {
        &self.vertices[..self.populated_vertex_count()]
    }

    /// The written vertex colors, excluding the zeroed border slots.
    pub fn surface_colors(&self) -> &[Color] {
        &self.colors[..self.populated_vertex_count()]
    }

    /// The triangle indices that describe actual grid quads.
    pub fn quad_triangles(&self) -> &[u32] {
        &self.triangles[..quad_count(self.width, self.length) * 6]
    }

    /// Number of triangles emitted for grid quads.
    pub fn triangle_count(&self) -> usize {
        quad_count(self.width, self.length) * 2
    }

    /// Vertex positions as bytes for GPU upload.
    pub fn positions_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex colors as bytes for GPU upload.
    pub fn colors_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Vertex normals as bytes for GPU upload.
    pub fn normals_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index buffer as bytes for GPU upload.
    pub fn indices_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

fn quad_count(width: usize, length: usize) -> usize {
    width.saturating_sub(1) * length.saturating_sub(1)
}

/// Index buffer for a `width x length` vertex grid laid out as `x * length + y`.
///
/// For every quad with corner `v = (x, y)` the triangles are
/// `(v, v + 1, v + L + 1)` and `(v, v + L + 1, v + L)`. `v` advances once per
/// quad and once more at the end of each column, skipping the last vertex of
/// the column. The buffer is sized `width * length * 6`; unused slots are 0.
pub fn triangulate_grid(width: usize, length: usize) -> Vec<u32> {
    let mut triangles = vec![0_u32; width * length * 6];
    let l = length as u32;

    let mut t = 0;
    let mut v = 0_u32;
    for _x in 0..width.saturating_sub(1) {
        for _y in 0..length.saturating_sub(1) {
            triangles[t..t + 6].copy_from_slice(&[v, v + 1, v + l + 1, v, v + l + 1, v + l]);
            v += 1;
            t += 6;
        }
        v += 1;
    }

    triangles
}

/// Area-weighted vertex normals.
///
/// Each triangle adds its unnormalized face normal (whose length is twice its
/// area) to its three vertices. Vertices that no triangle touches, or whose
/// sum cancels out, point straight up.
pub fn compute_normals(vertices: &[[f32; 3]], triangles: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from_array(vertices[a]);
        let pb = Vec3::from_array(vertices[b]);
        let pc = Vec3::from_array(vertices[c]);
        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    sums.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            let n = if n == Vec3::ZERO { Vec3::Y } else { n };
            n.to_array()
        })
        .collect()
}
