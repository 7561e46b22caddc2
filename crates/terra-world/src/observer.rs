//! Load/unload notifications for collaborators that mirror chunk state.

use terra_terrain::ChunkCoord;

use crate::chunk::Chunk;

/// Told about every chunk the manager loads or releases.
///
/// A renderer uses this to upload meshes and free GPU buffers. Callbacks run
/// on the thread calling [`ChunkManager::update`](crate::ChunkManager::update),
/// after the registry has changed.
pub trait ChunkObserver: Send {
    fn chunk_loaded(&mut self, chunk: &Chunk);

    fn chunk_unloaded(&mut self, coord: ChunkCoord);
}
