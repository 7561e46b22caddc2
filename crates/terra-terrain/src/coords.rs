//! Chunk grid coordinates.

/// Largest chunk index [`ChunkCoord::containing`] returns on either axis.
///
/// Leaves half the `i32` range as headroom, so neighbourhood scans around any
/// containing chunk never overflow.
pub const CHUNK_COORD_LIMIT: i32 = i32::MAX / 2;

/// Identifies a chunk's position on the horizontal chunk grid.
///
/// Chunk `(cx, cz)` covers world `x` in `[cx * size, (cx + 1) * size)` and
/// `z` in `[cz * size, (cz + 1) * size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub cx: i32,
    /// Chunk-grid Z coordinate.
    pub cz: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// The chunk containing world position `(x, z)`.
    ///
    /// Positions beyond [`CHUNK_COORD_LIMIT`] chunks from the origin map to
    /// the outermost chunk on that axis.
    pub fn containing(x: f64, z: f64, chunk_size: f64) -> Self {
        Self {
            cx: axis_index(x, chunk_size),
            cz: axis_index(z, chunk_size),
        }
    }

    /// Returns the coordinate offset by `(dx, dz)` chunks, saturating at the
    /// ends of the `i32` range.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx.saturating_add(dx),
            cz: self.cz.saturating_add(dz),
        }
    }

    /// World position of the chunk's minimum corner.
    pub fn origin(self, chunk_size: f64) -> (f64, f64) {
        (f64::from(self.cx) * chunk_size, f64::from(self.cz) * chunk_size)
    }

    /// World-space bounds as `(min_x, min_z, max_x, max_z)`.
    pub fn bounds(self, chunk_size: f64) -> (f64, f64, f64, f64) {
        let (x0, z0) = self.origin(chunk_size);
        (
            x0,
            z0,
            (f64::from(self.cx) + 1.0) * chunk_size,
            (f64::from(self.cz) + 1.0) * chunk_size,
        )
    }

    /// Squared Euclidean distance in chunk units.
    pub fn distance_sq(self, other: Self) -> i64 {
        let dx = i64::from(self.cx) - i64::from(other.cx);
        let dz = i64::from(self.cz) - i64::from(other.cz);
        dx * dx + dz * dz
    }

    /// Chebyshev (chessboard) distance in chunk units.
    pub fn chebyshev(self, other: Self) -> i64 {
        let dx = (i64::from(self.cx) - i64::from(other.cx)).abs();
        let dz = (i64::from(self.cz) - i64::from(other.cz)).abs();
        dx.max(dz)
    }
}

fn axis_index(v: f64, chunk_size: f64) -> i32 {
    let limit = f64::from(CHUNK_COORD_LIMIT);
    // NaN casts to 0.
    (v / chunk_size).floor().clamp(-limit, limit) as i32
}
