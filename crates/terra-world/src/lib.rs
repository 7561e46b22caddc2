//! Chunk streaming for the Terra world generator.
//!
//! A [`ChunkManager`] keeps the chunks around an observer loaded: it samples
//! each chunk's grid from the shared [`TerrainGenerator`](terra_terrain::TerrainGenerator),
//! meshes it, and releases chunks that fall out of range. Height and biome
//! queries read loaded grids and fall back to direct computation elsewhere.

mod chunk;
mod entrance_cache;
mod error;
mod generation;
mod load_queue;
mod manager;
mod observer;
mod registry;

pub use chunk::{CellSample, Chunk, RIVER_WATER_DEPTH};
pub use entrance_cache::EntranceCache;
pub use error::WorldError;
pub use generation::{ChunkJob, GeneratedChunk, generate_batch, generate_chunk, resolve_workers};
pub use load_queue::{ChunkLoadQueue, chunks_within};
pub use manager::{ChunkManager, StreamStats, StreamUpdate};
pub use observer::ChunkObserver;
pub use registry::ChunkRegistry;
