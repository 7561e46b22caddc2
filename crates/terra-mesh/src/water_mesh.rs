//! Water surface quads over submerged or river cells.

use crate::grid::{GridLayout, MeshError};
use crate::shading::WATER_COLOR;
use crate::terrain_mesh::push_cell_indices;
use crate::vertex::TerrainVertex;

/// Flat-shaded water quads for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaterMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl WaterMesh {
    /// Number of cells covered by water.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index data as a byte slice for GPU upload (zero-copy).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Build water quads from per-vertex water surface heights.
///
/// `surface[k]` is `Some(level)` where vertex `k` is under water. A cell
/// gets a quad when any of its corners is wet; dry corners take the highest
/// wet level of the cell. Returns `Ok(None)` when nothing is wet.
///
/// # Errors
///
/// Returns [`MeshError::GridSize`] when `surface` does not match `layout`.
pub fn build_water_mesh(
    layout: &GridLayout,
    surface: &[Option<f64>],
) -> Result<Option<WaterMesh>, MeshError> {
    layout.check("water surface", layout.vertex_count(), surface.len())?;

    let cells = layout.resolution as usize;
    let mut mesh = WaterMesh::default();
    for j in 0..cells {
        for i in 0..cells {
            let corners = [(i, j), (i + 1, j), (i, j + 1), (i + 1, j + 1)];
            let levels = corners.map(|(ci, cj)| surface[layout.index(ci, cj)]);
            let Some(top) = levels.iter().flatten().copied().reduce(f64::max) else {
                continue;
            };

            let base = mesh.vertices.len() as u32;
            for ((ci, cj), level) in corners.iter().zip(levels) {
                mesh.vertices.push(TerrainVertex::new(
                    [
                        layout.local_coord(*ci as i64) as f32,
                        level.unwrap_or(top) as f32,
                        layout.local_coord(*cj as i64) as f32,
                    ],
                    TerrainVertex::UP,
                    WATER_COLOR,
                ));
            }
            push_cell_indices(&mut mesh.indices, base, base + 1, base + 2, base + 3);
        }
    }

    Ok((!mesh.vertices.is_empty()).then_some(mesh))
}
