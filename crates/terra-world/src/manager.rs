//! Observer-driven chunk streaming and interpolated terrain queries.

use std::sync::Arc;

use terra_config::{Config, ConfigError};
use terra_mesh::GridLayout;
use terra_terrain::{BiomeDef, BiomeId, CaveEntrance, ChunkCoord, TerrainGenerator};
use tracing::{debug, info};

use crate::chunk::Chunk;
use crate::entrance_cache::EntranceCache;
use crate::error::WorldError;
use crate::generation::{ChunkJob, generate_batch, resolve_workers};
use crate::load_queue::{ChunkLoadQueue, chunks_within};
use crate::observer::ChunkObserver;
use crate::registry::ChunkRegistry;

/// Outcome of one [`ChunkManager::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    /// Whether the observer entered a new chunk. `false` means nothing ran.
    pub changed: bool,
    /// Newly loaded chunks, nearest first.
    pub loaded: Vec<ChunkCoord>,
    /// Released chunks, sorted by coordinate.
    pub unloaded: Vec<ChunkCoord>,
}

/// Running totals since the manager was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Updates that did work (observer changed chunk).
    pub updates: u64,
    pub generated: u64,
    pub released: u64,
    /// Summed per-chunk generation time in microseconds.
    pub generation_time_us: u64,
}

/// Keeps the chunks around an observer loaded and answers terrain queries.
///
/// Generation is synchronous from the caller's point of view: `update`
/// returns once every chunk it decided to load is in the registry.
pub struct ChunkManager {
    generator: Arc<TerrainGenerator>,
    layout: GridLayout,
    render_distance: u32,
    unload_distance: u32,
    snow_line: f64,
    workers: usize,
    registry: ChunkRegistry,
    queue: ChunkLoadQueue,
    entrance_cache: EntranceCache,
    observer: Option<Box<dyn ChunkObserver>>,
    center: Option<ChunkCoord>,
    stats: StreamStats,
}

impl ChunkManager {
    /// Create a manager streaming chunks from `generator`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Config`] if `config` fails validation or its
    /// chunk size differs from the generator's.
    pub fn new(generator: Arc<TerrainGenerator>, config: &Config) -> Result<Self, WorldError> {
        config.validate()?;
        let world = &config.world;
        if world.chunk_size != generator.chunk_size() {
            return Err(ConfigError::Invalid {
                field: "world.chunk_size",
                reason: format!(
                    "{} does not match the generator's chunk size {}",
                    world.chunk_size,
                    generator.chunk_size()
                ),
            }
            .into());
        }
        let workers = resolve_workers(world.generation_workers);
        debug!(
            render_distance = world.render_distance,
            unload_distance = world.unload_distance,
            grid_resolution = world.grid_resolution,
            workers,
            "chunk manager ready"
        );
        Ok(Self {
            generator,
            layout: GridLayout::new(world.grid_resolution, world.chunk_size),
            render_distance: world.render_distance,
            unload_distance: world.unload_distance,
            snow_line: world.snow_line,
            workers,
            registry: ChunkRegistry::new(),
            queue: ChunkLoadQueue::new(),
            entrance_cache: EntranceCache::new(),
            observer: None,
            center: None,
            stats: StreamStats::default(),
        })
    }

    /// Attach a collaborator told about every load and unload.
    pub fn with_observer(mut self, observer: Box<dyn ChunkObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Chunk the observer was in at the last effective update.
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    /// Move the observer to `(x, z)` and stream chunks accordingly.
    ///
    /// Does nothing when the observer is still in the same chunk as last
    /// time. Otherwise loads every missing chunk within the render distance,
    /// nearest first, then releases every chunk beyond the unload distance.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Mesh`] if a chunk could not be meshed; nothing
    /// from that update is inserted and the next call retries.
    pub fn update(&mut self, x: f64, z: f64) -> Result<StreamUpdate, WorldError> {
        let center = ChunkCoord::containing(x, z, self.layout.chunk_size);
        if self.center == Some(center) {
            return Ok(StreamUpdate::default());
        }

        for (coord, dist_sq) in chunks_within(center, self.render_distance) {
            if !self.registry.contains(coord) {
                self.queue.enqueue(coord, dist_sq);
            }
        }
        let order = self.queue.drain_nearest();

        let margin = self.layout.cell_size();
        let jobs: Vec<ChunkJob> = order
            .iter()
            .map(|&coord| ChunkJob {
                coord,
                entrances: self
                    .entrance_cache
                    .entrances_near(&self.generator, coord, margin),
            })
            .collect();
        let generated =
            generate_batch(&self.generator, &self.layout, self.snow_line, jobs, self.workers)?;

        let mut loaded = Vec::with_capacity(generated.len());
        for result in generated {
            let coord = result.chunk.coord;
            self.stats.generated += 1;
            self.stats.generation_time_us += result.generation_time_us;
            self.registry.insert(result.chunk);
            let chunk = self.registry.get(coord);
            if let (Some(observer), Some(chunk)) = (self.observer.as_mut(), chunk) {
                observer.chunk_loaded(chunk);
            }
            loaded.push(coord);
        }

        let unload_sq = i64::from(self.unload_distance) * i64::from(self.unload_distance);
        let mut unloaded: Vec<ChunkCoord> = self
            .registry
            .coords()
            .filter(|coord| coord.distance_sq(center) > unload_sq)
            .collect();
        unloaded.sort();
        for &coord in &unloaded {
            if self.registry.remove(coord).is_some() {
                self.stats.released += 1;
                if let Some(observer) = self.observer.as_mut() {
                    observer.chunk_unloaded(coord);
                }
            }
        }

        let keep = i64::from(self.unload_distance)
            + i64::from(self.generator.caves().check_radius())
            + 2;
        self.entrance_cache.retain_near(center, keep);

        self.center = Some(center);
        self.stats.updates += 1;
        info!(
            cx = center.cx,
            cz = center.cz,
            loaded = loaded.len(),
            unloaded = unloaded.len(),
            resident = self.registry.len(),
            "stream update"
        );
        Ok(StreamUpdate {
            changed: true,
            loaded,
            unloaded,
        })
    }

    /// Release every chunk and forget the observer position.
    pub fn unload_all(&mut self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.registry.coords().collect();
        coords.sort();
        for &coord in &coords {
            self.registry.remove(coord);
            self.stats.released += 1;
            if let Some(observer) = self.observer.as_mut() {
                observer.chunk_unloaded(coord);
            }
        }
        self.queue.clear();
        self.entrance_cache.clear();
        self.center = None;
        coords
    }

    /// Terrain elevation at `(x, z)`.
    ///
    /// Bilinear between the four surrounding grid vertices when the chunk is
    /// loaded, computed directly otherwise.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        match self.chunk_containing(x, z) {
            Some(chunk) => chunk.interpolate_height(x, z),
            None => self.generator.height_at(x, z).elevation,
        }
    }

    /// Biome at `(x, z)`: the nearest grid vertex's when loaded, classified
    /// directly otherwise.
    pub fn biome_id_at(&self, x: f64, z: f64) -> BiomeId {
        match self.chunk_containing(x, z) {
            Some(chunk) => chunk.nearest_cell(x, z).biome,
            None => self.generator.classify_at(x, z),
        }
    }

    pub fn biome_at(&self, x: f64, z: f64) -> &BiomeDef {
        self.generator.registry().get(self.biome_id_at(x, z))
    }

    /// Entrance bowls reaching into `coord`, loaded or not.
    pub fn entrances(&self, coord: ChunkCoord) -> Vec<CaveEntrance> {
        match self.registry.get(coord) {
            Some(chunk) => chunk.entrances.clone(),
            None => self.generator.entrances_near_chunk(coord),
        }
    }

    fn chunk_containing(&self, x: f64, z: f64) -> Option<&Chunk> {
        self.registry
            .get(ChunkCoord::containing(x, z, self.layout.chunk_size))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.registry.get(coord)
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.registry.contains(coord)
    }

    pub fn loaded_count(&self) -> usize {
        self.registry.len()
    }

    /// Loaded coordinates, sorted.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.registry.coords().collect();
        coords.sort();
        coords
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }
}
