//! Terrain surface mesh from a sampled height grid.

use glam::DVec3;

use crate::grid::{GridLayout, MeshError};
use crate::vertex::TerrainVertex;

/// Triangle mesh of one chunk's terrain surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
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

/// Push two counter-clockwise (seen from +Y) triangles per grid cell.
pub(crate) fn push_cell_indices(indices: &mut Vec<u32>, v00: u32, v10: u32, v01: u32, v11: u32) {
    indices.extend_from_slice(&[v00, v01, v11, v00, v11, v10]);
}

/// Build the terrain mesh of one chunk.
///
/// `heights` holds `(N + 3)^2` samples: the chunk's `(N + 1)^2` vertices plus
/// a one-vertex apron, used for central-difference normals that agree with
/// the neighbouring chunk along shared edges. `colors` holds one colour per
/// real vertex.
///
/// # Errors
///
/// Returns [`MeshError::GridSize`] when a buffer does not match `layout`.
pub fn build_terrain_mesh(
    layout: &GridLayout,
    heights: &[f64],
    colors: &[[f32; 3]],
) -> Result<TerrainMesh, MeshError> {
    layout.check("heights", layout.apron_count(), heights.len())?;
    layout.check("colors", layout.vertex_count(), colors.len())?;

    let n = layout.resolution as i64;
    let side = layout.side();
    let two_cells = 2.0 * layout.cell_size();
    let h = |i: i64, j: i64| heights[layout.apron_index(i, j)];

    let mut vertices = Vec::with_capacity(layout.vertex_count());
    for j in 0..=n {
        for i in 0..=n {
            let dx = (h(i + 1, j) - h(i - 1, j)) / two_cells;
            let dz = (h(i, j + 1) - h(i, j - 1)) / two_cells;
            let normal = DVec3::new(-dx, 1.0, -dz).normalize();
            vertices.push(TerrainVertex::new(
                [
                    layout.local_coord(i) as f32,
                    h(i, j) as f32,
                    layout.local_coord(j) as f32,
                ],
                normal.as_vec3().to_array(),
                colors[layout.index(i as usize, j as usize)],
            ));
        }
    }

    let cells = layout.resolution as usize;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for j in 0..cells {
        for i in 0..cells {
            let v00 = layout.index(i, j) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + side as u32;
            let v11 = v01 + 1;
            push_cell_indices(&mut indices, v00, v10, v01, v11);
        }
    }

    Ok(TerrainMesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(layout: &GridLayout, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        let n = layout.resolution as i64;
        let mut out = Vec::with_capacity(layout.apron_count());
        for j in -1..=n + 1 {
            for i in -1..=n + 1 {
                out.push(f(layout.local_coord(i), layout.local_coord(j)));
            }
        }
        out
    }

    #[test]
    fn test_counts_for_resolution() {
        let layout = GridLayout::new(6, 60.0);
        let mesh = build_terrain_mesh(
            &layout,
            &plane(&layout, |_, _| 0.0),
            &vec![[0.5; 3]; layout.vertex_count()],
        )
        .unwrap();
        assert_eq!(mesh.vertices.len(), 49);
        assert_eq!(mesh.indices.len(), 6 * 36);
        assert_eq!(mesh.triangle_count(), 72);
        assert_eq!(mesh.vertex_bytes().len(), 49 * 36);
    }

    #[test]
    fn test_indices_in_range_and_facing_up() {
        let layout = GridLayout::new(4, 32.0);
        let mesh = build_terrain_mesh(
            &layout,
            &plane(&layout, |_, _| 3.0),
            &vec![[0.0; 3]; layout.vertex_count()],
        )
        .unwrap();
        for tri in mesh.indices.chunks_exact(3) {
            let p = |k: usize| glam::Vec3::from(mesh.vertices[tri[k] as usize].position);
            let n = (p(1) - p(0)).cross(p(2) - p(0));
            assert!(n.y > 0.0, "triangle {tri:?} faces down");
        }
    }

    #[test]
    fn test_flat_normals_point_up() {
        let layout = GridLayout::new(4, 32.0);
        let mesh = build_terrain_mesh(
            &layout,
            &plane(&layout, |_, _| 10.0),
            &vec![[0.0; 3]; layout.vertex_count()],
        )
        .unwrap();
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], 10.0);
        }
    }

    #[test]
    fn test_slope_normal_tilts_downhill() {
        let layout = GridLayout::new(4, 32.0);
        let mesh = build_terrain_mesh(
            &layout,
            &plane(&layout, |x, _| x * 0.5),
            &vec![[0.0; 3]; layout.vertex_count()],
        )
        .unwrap();
        for v in &mesh.vertices {
            assert!(v.normal[0] < 0.0, "normal should lean toward -x on a +x slope");
            assert!(v.normal[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_wrong_buffer_size_rejected() {
        let layout = GridLayout::new(4, 32.0);
        let err = build_terrain_mesh(&layout, &[0.0; 25], &vec![[0.0; 3]; 25]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::GridSize {
                buffer: "heights",
                expected: 49,
                actual: 25
            }
        ));
    }
}
