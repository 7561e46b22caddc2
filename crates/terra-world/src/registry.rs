//! Owner of every loaded chunk, keyed by [`ChunkCoord`].

use rustc_hash::FxHashMap;
use terra_terrain::ChunkCoord;

use crate::chunk::Chunk;

/// Loaded chunks of one [`ChunkManager`](crate::ChunkManager).
///
/// The single authority for which chunks exist in memory; each manager owns
/// its own registry.
#[derive(Debug, Default)]
pub struct ChunkRegistry {
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl ChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chunk under its own coordinate, replacing any previous one.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.coord, chunk)
    }

    /// Remove and return the chunk at `coord`.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Loaded coordinates in arbitrary order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        self.chunks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }
}
