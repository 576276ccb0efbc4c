//! Writers for generated artifacts: PNG previews and Wavefront OBJ meshes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use landmass_mesh::TerrainMesh;
use landmass_terrain::DebugImage;

use crate::error::ExportError;

/// Save an RGBA debug image. The format follows the file extension.
pub fn save_image(image: &DebugImage, path: &Path) -> Result<(), ExportError> {
    create_parent(path)?;
    image::save_buffer(
        path,
        &image.pixels,
        image.width,
        image.height,
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|source| ExportError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "wrote image"
    );
    Ok(())
}

/// Write the populated part of `mesh` as OBJ text.
///
/// Vertices carry their gradient color as the `v x y z r g b` extension.
/// Faces use 1-based `v//vn` references and only the quad triangles are
/// emitted; the zero-filled tail of the index buffer is skipped.
pub fn write_obj<W: Write>(mesh: &TerrainMesh, out: &mut W) -> io::Result<()> {
    writeln!(out, "# landmass terrain {}x{}", mesh.width(), mesh.length())?;
    writeln!(out, "o terrain")?;

    for (position, color) in mesh.surface_vertices().iter().zip(mesh.surface_colors()) {
        writeln!(
            out,
            "v {} {} {} {} {} {}",
            position[0], position[1], position[2], color.r, color.g, color.b
        )?;
    }

    for normal in &mesh.normals[..mesh.populated_vertex_count()] {
        writeln!(out, "vn {} {} {}", normal[0], normal[1], normal[2])?;
    }

    for tri in mesh.quad_triangles().chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}

/// Write `mesh` to an OBJ file at `path`.
pub fn save_obj(mesh: &TerrainMesh, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    create_parent(path)?;
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_obj(mesh, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    tracing::info!(
        path = %path.display(),
        vertices = mesh.populated_vertex_count(),
        triangles = mesh.triangle_count(),
        "wrote OBJ mesh"
    );
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
