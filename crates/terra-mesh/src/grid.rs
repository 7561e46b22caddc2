//! Vertex lattice of one chunk.

/// Errors raised when a sampled grid does not match its layout.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// A per-vertex buffer has the wrong number of entries.
    #[error("{buffer} has {actual} entries, expected {expected}")]
    GridSize {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Shape of a chunk's vertex grid: `resolution` cells per edge,
/// `resolution + 1` vertices per edge, one extra ring of apron samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub resolution: u32,
    pub chunk_size: f64,
}

impl GridLayout {
    pub fn new(resolution: u32, chunk_size: f64) -> Self {
        Self {
            resolution,
            chunk_size,
        }
    }

    /// Vertices per edge.
    pub fn side(&self) -> usize {
        self.resolution as usize + 1
    }

    /// Samples per edge including the one-vertex apron on each side.
    pub fn apron_side(&self) -> usize {
        self.resolution as usize + 3
    }

    pub fn vertex_count(&self) -> usize {
        self.side() * self.side()
    }

    pub fn apron_count(&self) -> usize {
        self.apron_side() * self.apron_side()
    }

    /// World distance between neighbouring vertices.
    pub fn cell_size(&self) -> f64 {
        self.chunk_size / f64::from(self.resolution)
    }

    /// Chunk-local coordinate of lattice index `i` (may be -1 or N + 1 for the apron).
    pub fn local_coord(&self, i: i64) -> f64 {
        i as f64 * self.chunk_size / f64::from(self.resolution)
    }

    /// Row-major index of vertex `(i, j)` in an `(N + 1)^2` buffer.
    pub fn index(&self, i: usize, j: usize) -> usize {
        j * self.side() + i
    }

    /// Row-major index of vertex `(i, j)` in the apron buffer, where `(0, 0)`
    /// is the chunk's first real vertex.
    pub fn apron_index(&self, i: i64, j: i64) -> usize {
        ((j + 1) as usize) * self.apron_side() + (i + 1) as usize
    }

    pub(crate) fn check(
        &self,
        buffer: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), MeshError> {
        if expected == actual {
            Ok(())
        } else {
            Err(MeshError::GridSize {
                buffer,
                expected,
                actual,
            })
        }
    }
}
