//! `terra`: headless driver for the world generator.
//!
//! Loads `world.ron` (created with defaults on first run), applies CLI
//! overrides, then walks an observer east from the origin, streaming chunks
//! at a fixed cadence. Optionally writes biome and height maps as PNG.
//!
//! Run with `cargo run -p terra-app -- --seed alpha --walk 40 --map out/alpha.png`.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use clap::Parser;
use terra_app::{AppError, MeshResidency, PlatformDirs, UpdateCadence, export_maps};
use terra_config::{CliArgs, Config};
use terra_terrain::TerrainGenerator;
use terra_terrain::debug_viz::MapRegion;
use terra_world::ChunkManager;
use tracing::{debug, info};

/// Simulated frame time of the headless loop (60 FPS).
const FRAME_TIME: f64 = 1.0 / 60.0;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terra: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = &args.config {
        dirs = dirs.with_config_dir(config_dir.clone());
    }
    dirs.create_all()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    terra_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions) || config.debug.log_to_file,
        Some(&config),
    );
    info!(
        config = %dirs.config_dir.display(),
        logs = %dirs.log_dir.display(),
        "terra starting"
    );

    let generator = Arc::new(TerrainGenerator::new(&config)?);
    let residency = MeshResidency::new();
    let counters = residency.counters();
    let mut manager =
        ChunkManager::new(Arc::clone(&generator), &config)?.with_observer(Box::new(residency));
    info!(
        seed = generator.seed().value(),
        chunk_size = config.world.chunk_size,
        render_distance = config.world.render_distance,
        "world ready"
    );

    let mut cadence = UpdateCadence::default();
    let step = args.speed * cadence.interval();
    let z = 0.0;
    let mut x = 0.0;
    manager.update(x, z)?;

    let mut ticks = 0;
    while ticks < args.walk {
        for _ in 0..cadence.advance(FRAME_TIME) {
            if ticks == args.walk {
                break;
            }
            x += step;
            ticks += 1;
            let update = manager.update(x, z)?;
            if update.changed {
                debug!(
                    tick = ticks,
                    x,
                    loaded = update.loaded.len(),
                    unloaded = update.unloaded.len(),
                    "observer entered new chunk"
                );
            }
        }
    }

    let stats = manager.stats();
    let avg_us = stats.generation_time_us.checked_div(stats.generated).unwrap_or(0);
    info!(
        ticks,
        simulated_s = cadence.elapsed(),
        generated = stats.generated,
        released = stats.released,
        resident = manager.loaded_count(),
        mesh_bytes = counters.bytes.load(Ordering::Relaxed),
        avg_chunk_us = avg_us,
        "walk finished"
    );
    info!(
        x,
        z,
        height = manager.height_at(x, z),
        biome = %manager.biome_at(x, z).name,
        "observer position"
    );

    if let Some(path) = &args.map {
        let half_extent = f64::from(config.world.render_distance + 1) * config.world.chunk_size;
        let region = MapRegion::centered(x, z, half_extent);
        let entrances: Vec<_> = manager
            .loaded_coords()
            .into_iter()
            .filter_map(|coord| manager.chunk(coord))
            .flat_map(|chunk| chunk.entrances.iter().copied())
            .collect();
        export_maps(&generator, path, args.map_size, &region, &entrances)?;
    }

    Ok(())
}
