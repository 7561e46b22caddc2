//! A loaded chunk: sampled grid plus the geometry built from it.

use terra_mesh::{GridLayout, TerrainMesh, WaterMesh};
use terra_terrain::{BiomeId, CaveEntrance, ChunkCoord, ClimateVector};

/// Depth of the water sheet drawn over river vertices.
pub const RIVER_WATER_DEPTH: f64 = 0.4;

/// Per-vertex data kept alongside the elevation grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSample {
    pub climate: ClimateVector,
    pub biome: BiomeId,
    /// Below sea level or inside a river channel.
    pub is_water: bool,
}

/// One square cell of the world with its grid and meshes.
///
/// Grids are `(N + 1)^2`, row-major in `z` then `x`, with vertex `(i, j)` at
/// world `((cx * N + i) * size / N, (cz * N + j) * size / N)`.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub layout: GridLayout,
    pub heights: Vec<f64>,
    pub cells: Vec<CellSample>,
    pub mesh: TerrainMesh,
    pub water: Option<WaterMesh>,
    /// Entrance bowls that reach into this chunk.
    pub entrances: Vec<CaveEntrance>,
}

impl Chunk {
    /// Elevation of vertex `(i, j)`.
    pub fn height(&self, i: usize, j: usize) -> f64 {
        self.heights[self.layout.index(i, j)]
    }

    pub fn cell(&self, i: usize, j: usize) -> &CellSample {
        &self.cells[self.layout.index(i, j)]
    }

    pub fn has_water(&self) -> bool {
        self.water.is_some()
    }

    /// Position of world `(x, z)` on this chunk's lattice, in vertex units.
    fn lattice_position(&self, x: f64, z: f64) -> (f64, f64) {
        let n = f64::from(self.layout.resolution);
        let scale = n / self.layout.chunk_size;
        (
            x * scale - f64::from(self.coord.cx) * n,
            z * scale - f64::from(self.coord.cz) * n,
        )
    }

    /// Bilinear interpolation of the four vertices around `(x, z)`.
    ///
    /// Points outside the chunk are clamped to its edge.
    pub fn interpolate_height(&self, x: f64, z: f64) -> f64 {
        let n = self.layout.resolution as usize;
        let (fx, fz) = self.lattice_position(x, z);
        let (i, tx) = split_cell(fx, n);
        let (j, tz) = split_cell(fz, n);

        let h00 = self.height(i, j);
        let h10 = self.height(i + 1, j);
        let h01 = self.height(i, j + 1);
        let h11 = self.height(i + 1, j + 1);
        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        top + (bottom - top) * tz
    }

    /// Cell data of the vertex nearest to `(x, z)`.
    pub fn nearest_cell(&self, x: f64, z: f64) -> &CellSample {
        let n = f64::from(self.layout.resolution);
        let (fx, fz) = self.lattice_position(x, z);
        let i = fx.round().clamp(0.0, n) as usize;
        let j = fz.round().clamp(0.0, n) as usize;
        self.cell(i, j)
    }
}

/// Cell index and fractional offset of lattice coordinate `f` in `[0, n]`.
fn split_cell(f: f64, n: usize) -> (usize, f64) {
    let f = f.clamp(0.0, n as f64);
    let i = (f.floor() as usize).min(n - 1);
    (i, f - i as f64)
}
