//! Bookkeeping for chunk meshes a renderer would keep on the GPU.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use terra_terrain::ChunkCoord;
use terra_world::{Chunk, ChunkObserver};

/// Totals shared between a [`MeshResidency`] and whoever reports on it.
#[derive(Debug, Default)]
pub struct ResidencyCounters {
    pub chunks: AtomicU64,
    pub bytes: AtomicU64,
    pub uploads: AtomicU64,
    pub releases: AtomicU64,
}

/// Tracks the vertex and index bytes of every loaded chunk, standing in for
/// GPU buffer uploads and releases.
#[derive(Debug, Default)]
pub struct MeshResidency {
    resident: FxHashMap<ChunkCoord, u64>,
    counters: Arc<ResidencyCounters>,
}

impl MeshResidency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Arc<ResidencyCounters> {
        Arc::clone(&self.counters)
    }
}

fn mesh_bytes(chunk: &Chunk) -> u64 {
    let terrain = chunk.mesh.vertex_bytes().len() + chunk.mesh.index_bytes().len();
    let water = chunk
        .water
        .as_ref()
        .map_or(0, |w| w.vertex_bytes().len() + w.index_bytes().len());
    (terrain + water) as u64
}

impl ChunkObserver for MeshResidency {
    fn chunk_loaded(&mut self, chunk: &Chunk) {
        let bytes = mesh_bytes(chunk);
        if let Some(previous) = self.resident.insert(chunk.coord, bytes) {
            self.counters.bytes.fetch_sub(previous, Ordering::Relaxed);
        } else {
            self.counters.chunks.fetch_add(1, Ordering::Relaxed);
        }
        self.counters.bytes.fetch_add(bytes, Ordering::Relaxed);
        self.counters.uploads.fetch_add(1, Ordering::Relaxed);
    }

    fn chunk_unloaded(&mut self, coord: ChunkCoord) {
        if let Some(bytes) = self.resident.remove(&coord) {
            self.counters.chunks.fetch_sub(1, Ordering::Relaxed);
            self.counters.bytes.fetch_sub(bytes, Ordering::Relaxed);
            self.counters.releases.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_mesh::{GridLayout, TerrainMesh, TerrainVertex};

    fn chunk(cx: i32, vertices: usize) -> Chunk {
        Chunk {
            coord: ChunkCoord::new(cx, 0),
            layout: GridLayout::new(1, 16.0),
            heights: Vec::new(),
            cells: Vec::new(),
            mesh: TerrainMesh {
                vertices: vec![TerrainVertex::new([0.0; 3], TerrainVertex::UP, [1.0; 3]); vertices],
                indices: vec![0; 6],
            },
            water: None,
            entrances: Vec::new(),
        }
    }

    #[test]
    fn test_load_and_unload_balance() {
        let mut residency = MeshResidency::new();
        let counters = residency.counters();
        residency.chunk_loaded(&chunk(0, 4));
        residency.chunk_loaded(&chunk(1, 2));
        assert_eq!(counters.chunks.load(Ordering::Relaxed), 2);
        assert_eq!(counters.bytes.load(Ordering::Relaxed), (6 * 36 + 2 * 24) as u64);

        residency.chunk_unloaded(ChunkCoord::new(0, 0));
        assert_eq!(counters.chunks.load(Ordering::Relaxed), 1);
        assert_eq!(counters.bytes.load(Ordering::Relaxed), (2 * 36 + 24) as u64);
        assert_eq!(counters.releases.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_unknown_unload_ignored() {
        let mut residency = MeshResidency::new();
        residency.chunk_unloaded(ChunkCoord::new(5, 5));
        assert_eq!(residency.counters().releases.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_reload_replaces_bytes() {
        let mut residency = MeshResidency::new();
        let counters = residency.counters();
        residency.chunk_loaded(&chunk(0, 4));
        residency.chunk_loaded(&chunk(0, 1));
        assert_eq!(counters.chunks.load(Ordering::Relaxed), 1);
        assert_eq!(counters.bytes.load(Ordering::Relaxed), (36 + 24) as u64);
        assert_eq!(counters.uploads.load(Ordering::Relaxed), 2);
    }
}
