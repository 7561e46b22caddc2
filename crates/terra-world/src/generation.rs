//! Chunk generation: grid sampling and meshing, inline or on worker threads.
//!
//! Generating a chunk is a pure function of its coordinate, its entrance
//! list, and the shared generator, so a batch can be split across scoped
//! threads. Workers pull jobs from one channel and push finished chunks into
//! another; the calling thread works through the queue too and returns once
//! every job is done.

use std::thread;
use std::time::Instant;

use crossbeam_channel::bounded;
use terra_mesh::{GridLayout, MeshError, build_terrain_mesh, build_water_mesh, shade_color};
use terra_terrain::{CaveEntrance, ChunkCoord, TerrainGenerator};
use tracing::{debug, warn};

use crate::chunk::{CellSample, Chunk, RIVER_WATER_DEPTH};

/// Everything needed to generate one chunk.
#[derive(Clone, Debug)]
pub struct ChunkJob {
    pub coord: ChunkCoord,
    /// Bowls reaching into the chunk or its one-cell normal apron.
    pub entrances: Vec<CaveEntrance>,
}

/// A generated chunk ready for insertion.
#[derive(Debug)]
pub struct GeneratedChunk {
    pub chunk: Chunk,
    /// Generation time in microseconds (for profiling).
    pub generation_time_us: u64,
}

/// Worker count for a configured value: `0` means one per CPU.
pub fn resolve_workers(configured: usize) -> usize {
    if configured == 0 {
        num_cpus::get().max(1)
    } else {
        configured
    }
}

/// Sample, shade, and mesh one chunk.
///
/// # Errors
///
/// Returns [`MeshError`] if the sampled buffers do not fit `layout`.
pub fn generate_chunk(
    generator: &TerrainGenerator,
    layout: &GridLayout,
    snow_line: f64,
    job: ChunkJob,
) -> Result<Chunk, MeshError> {
    let n = i64::from(layout.resolution);
    let coord = job.coord;
    let base_i = i64::from(coord.cx) * n;
    let base_j = i64::from(coord.cz) * n;
    let lattice = |k: i64| k as f64 * layout.chunk_size / f64::from(layout.resolution);
    let sea_level = generator.sea_level();
    let registry = generator.registry();

    let mut apron = Vec::with_capacity(layout.apron_count());
    let mut heights = Vec::with_capacity(layout.vertex_count());
    let mut cells = Vec::with_capacity(layout.vertex_count());
    let mut colors = Vec::with_capacity(layout.vertex_count());
    let mut water_surface = Vec::with_capacity(layout.vertex_count());

    for j in -1..=n + 1 {
        let z = lattice(base_j + j);
        for i in -1..=n + 1 {
            let x = lattice(base_i + i);
            let sample = generator.sample_with_entrances(x, z, &job.entrances);
            apron.push(sample.elevation);
            if !(0..=n).contains(&i) || !(0..=n).contains(&j) {
                continue;
            }

            let surface = if sample.elevation < sea_level {
                Some(sea_level)
            } else if sample.is_river {
                Some(sample.elevation + RIVER_WATER_DEPTH)
            } else {
                None
            };
            heights.push(sample.elevation);
            cells.push(CellSample {
                climate: sample.climate,
                biome: sample.biome,
                is_water: surface.is_some(),
            });
            colors.push(shade_color(
                registry.get(sample.biome).color_f32(),
                sample.elevation,
                sea_level,
                snow_line,
            ));
            water_surface.push(surface);
        }
    }

    let mesh = build_terrain_mesh(layout, &apron, &colors)?;
    let water = build_water_mesh(layout, &water_surface)?;

    let (min_x, min_z, max_x, max_z) = coord.bounds(layout.chunk_size);
    let entrances: Vec<CaveEntrance> = job
        .entrances
        .into_iter()
        .filter(|e| e.touches_rect(min_x, min_z, max_x, max_z))
        .collect();

    debug!(
        cx = coord.cx,
        cz = coord.cz,
        water_quads = water.as_ref().map_or(0, |w| w.quad_count()),
        entrances = entrances.len(),
        "generated chunk"
    );

    Ok(Chunk {
        coord,
        layout: *layout,
        heights,
        cells,
        mesh,
        water,
        entrances,
    })
}

fn timed(
    generator: &TerrainGenerator,
    layout: &GridLayout,
    snow_line: f64,
    job: ChunkJob,
) -> Result<GeneratedChunk, MeshError> {
    let start = Instant::now();
    let chunk = generate_chunk(generator, layout, snow_line, job)?;
    Ok(GeneratedChunk {
        chunk,
        generation_time_us: start.elapsed().as_micros() as u64,
    })
}

/// Generate every job, returning chunks in job order.
///
/// With `workers <= 1` (or a single job) everything runs on the calling
/// thread. Otherwise `workers - 1` helper threads share the queue with the
/// caller.
///
/// # Errors
///
/// Returns the first [`MeshError`] in job order.
pub fn generate_batch(
    generator: &TerrainGenerator,
    layout: &GridLayout,
    snow_line: f64,
    jobs: Vec<ChunkJob>,
    workers: usize,
) -> Result<Vec<GeneratedChunk>, MeshError> {
    if workers <= 1 || jobs.len() <= 1 {
        return jobs
            .into_iter()
            .map(|job| timed(generator, layout, snow_line, job))
            .collect();
    }

    let total = jobs.len();
    let (task_tx, task_rx) = bounded::<(usize, ChunkJob)>(total);
    let (result_tx, result_rx) = bounded::<(usize, Result<GeneratedChunk, MeshError>)>(total);
    for task in jobs.into_iter().enumerate() {
        // Both ends are alive and the channel holds every job.
        let _ = task_tx.send(task);
    }
    drop(task_tx);

    let run = |task_rx: crossbeam_channel::Receiver<(usize, ChunkJob)>,
               result_tx: crossbeam_channel::Sender<(usize, Result<GeneratedChunk, MeshError>)>| {
        while let Ok((index, job)) = task_rx.recv() {
            let _ = result_tx.send((index, timed(generator, layout, snow_line, job)));
        }
    };

    let mut results: Vec<_> = thread::scope(|scope| {
        let helpers = (workers - 1).min(total - 1);
        for _ in 0..helpers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let spawned = thread::Builder::new()
                .name("chunk-gen-worker".into())
                .spawn_scoped(scope, move || run(task_rx, result_tx));
            if let Err(err) = spawned {
                warn!(%err, "failed to spawn chunk worker, continuing with fewer threads");
            }
        }
        run(task_rx, result_tx);
        result_rx.iter().collect()
    });

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_config::Config;

    fn setup() -> (TerrainGenerator, GridLayout) {
        let mut config = Config::default();
        config.world.seed = "alpha".into();
        config.world.chunk_size = 128.0;
        config.world.grid_resolution = 8;
        config.terrain.plateau_radius = 64.0;
        let generator = TerrainGenerator::new(&config).unwrap();
        (generator, GridLayout::new(8, 128.0))
    }

    fn job(generator: &TerrainGenerator, coord: ChunkCoord, margin: f64) -> ChunkJob {
        let mut cache = crate::EntranceCache::new();
        ChunkJob {
            coord,
            entrances: cache.entrances_near(generator, coord, margin),
        }
    }

    #[test]
    fn test_grid_sizes() {
        let (generator, layout) = setup();
        let chunk_job = job(&generator, ChunkCoord::new(3, 1), 16.0);
        let chunk = generate_chunk(&generator, &layout, 520.0, chunk_job).unwrap();
        assert_eq!(chunk.heights.len(), 81);
        assert_eq!(chunk.cells.len(), 81);
        assert_eq!(chunk.mesh.vertices.len(), 81);
        assert_eq!(chunk.mesh.indices.len(), 6 * 64);
    }

    #[test]
    fn test_grid_matches_generator_on_lattice() {
        let (generator, layout) = setup();
        let coord = ChunkCoord::new(-2, 5);
        let chunk =
            generate_chunk(&generator, &layout, 520.0, job(&generator, coord, 16.0)).unwrap();
        let strict = generator.entrances_near_chunk(coord);
        for (i, j) in [(0, 0), (3, 7), (8, 8), (5, 0)] {
            let x = f64::from(coord.cx * 8 + i as i32) * 16.0;
            let z = f64::from(coord.cz * 8 + j as i32) * 16.0;
            let expected = generator.sample_with_entrances(x, z, &strict);
            assert_eq!(chunk.height(i, j).to_bits(), expected.elevation.to_bits());
            assert_eq!(chunk.cell(i, j).biome, expected.biome);
        }
    }

    #[test]
    fn test_water_flags_follow_sea_level() {
        let (generator, layout) = setup();
        let chunk_job = job(&generator, ChunkCoord::new(20, -7), 16.0);
        let chunk = generate_chunk(&generator, &layout, 520.0, chunk_job).unwrap();
        for (h, cell) in chunk.heights.iter().zip(&chunk.cells) {
            if *h < generator.sea_level() {
                assert!(cell.is_water);
            }
        }
        assert_eq!(chunk.has_water(), chunk.cells.iter().any(|c| c.is_water));
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let (generator, layout) = setup();
        let jobs: Vec<_> = (0..6)
            .map(|k| job(&generator, ChunkCoord::new(k - 3, k % 2), 16.0))
            .collect();
        let sequential = generate_batch(&generator, &layout, 520.0, jobs.clone(), 1).unwrap();
        let parallel = generate_batch(&generator, &layout, 520.0, jobs, 4).unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.chunk.coord, b.chunk.coord);
            assert_eq!(a.chunk.heights, b.chunk.heights);
            assert_eq!(a.chunk.mesh, b.chunk.mesh);
            assert_eq!(a.chunk.entrances, b.chunk.entrances);
        }
    }

    #[test]
    fn test_resolve_workers() {
        assert_eq!(resolve_workers(3), 3);
        assert!(resolve_workers(0) >= 1);
    }
}
