//! Streaming scenarios against the real generator.

use std::sync::Arc;

use terra_config::Config;
use terra_terrain::{ChunkCoord, TerrainGenerator};
use terra_world::ChunkManager;

fn alpha(render_distance: u32, unload_distance: u32) -> Config {
    let mut config = Config::default();
    config.world.seed = "alpha".into();
    config.world.chunk_size = 512.0;
    config.world.grid_resolution = 48;
    config.world.render_distance = render_distance;
    config.world.unload_distance = unload_distance;
    config
}

fn manager(config: &Config) -> ChunkManager {
    let generator = Arc::new(TerrainGenerator::new(config).unwrap());
    ChunkManager::new(generator, config).unwrap()
}

#[test]
fn test_alpha_origin_loads_center_only_nearby() {
    let mut mgr = manager(&alpha(2, 3));
    let update = mgr.update(0.0, 0.0).unwrap();
    assert!(update.changed);
    assert_eq!(update.loaded.first(), Some(&ChunkCoord::new(0, 0)));
    assert!(mgr.is_loaded(ChunkCoord::new(0, 0)));
    assert!(!mgr.is_loaded(ChunkCoord::new(10, 10)));
    assert_eq!(mgr.height_at(0.0, 0.0), 0.0, "spawn plateau sits at zero");
}

#[test]
fn test_alpha_default_render_distance() {
    let mut config = Config::default();
    config.world.seed = "alpha".into();
    config.world.generation_workers = 0;
    let mut mgr = manager(&config);
    let update = mgr.update(0.0, 0.0).unwrap();
    // Disc of radius 6 on the chunk grid.
    assert_eq!(update.loaded.len(), 113);
    assert!(mgr.is_loaded(ChunkCoord::new(0, 0)));
    assert!(mgr.is_loaded(ChunkCoord::new(6, 0)));
    assert!(!mgr.is_loaded(ChunkCoord::new(5, 5)));
    assert!(!mgr.is_loaded(ChunkCoord::new(10, 10)));
}

#[test]
fn test_repeated_update_is_noop() {
    let mut mgr = manager(&alpha(1, 2));
    mgr.update(0.0, 0.0).unwrap();
    let before = mgr.loaded_coords();
    let stats = mgr.stats();

    let again = mgr.update(0.0, 0.0).unwrap();
    assert!(!again.changed);
    assert!(again.loaded.is_empty() && again.unloaded.is_empty());
    assert_eq!(mgr.loaded_coords(), before);
    assert_eq!(mgr.stats(), stats);
}

#[test]
fn test_walk_keeps_render_disc_loaded_and_releases_far_chunks() {
    let config = alpha(1, 2);
    let mut mgr = manager(&config);
    let (render, unload) = (1i64, 2i64);

    for step in 0..6 {
        let x = f64::from(step) * 512.0 + 100.0;
        let update = mgr.update(x, 40.0).unwrap();
        assert!(update.changed, "step {step} entered a new chunk");

        let center = ChunkCoord::containing(x, 40.0, 512.0);
        for dz in -1..=1 {
            for dx in -1..=1 {
                let coord = center.offset(dx, dz);
                if coord.distance_sq(center) <= render * render {
                    assert!(mgr.is_loaded(coord), "{coord:?} missing at step {step}");
                }
            }
        }
        for coord in mgr.loaded_coords() {
            assert!(coord.distance_sq(center) <= unload * unload, "{coord:?} kept too long");
        }
        for coord in &update.unloaded {
            assert!(!mgr.is_loaded(*coord));
        }
    }

    let stats = mgr.stats();
    assert_eq!(stats.generated - stats.released, mgr.loaded_count() as u64);
    assert!(stats.released > 0);
}

#[test]
fn test_neighbouring_chunks_share_edges() {
    let mut mgr = manager(&alpha(1, 2));
    mgr.update(900.0, 1200.0).unwrap();
    let n = 48;

    let a = mgr.chunk(ChunkCoord::new(1, 2)).unwrap();
    let b = mgr.chunk(ChunkCoord::new(2, 2)).unwrap();
    let side = a.layout.side();
    for j in 0..=n {
        assert_eq!(a.height(n, j).to_bits(), b.height(0, j).to_bits(), "x edge row {j}");
        let va = a.mesh.vertices[j * side + n];
        let vb = b.mesh.vertices[j * side];
        assert_eq!(va.position[1], vb.position[1]);
        assert_eq!(va.normal, vb.normal, "normal seam at row {j}");
        assert_eq!(a.cell(n, j).biome, b.cell(0, j).biome, "biome seam at row {j}");
        assert_eq!(a.cell(n, j).is_water, b.cell(0, j).is_water, "water seam at row {j}");
    }

    let c = mgr.chunk(ChunkCoord::new(1, 3)).unwrap();
    for i in 0..=n {
        assert_eq!(a.height(i, n).to_bits(), c.height(i, 0).to_bits(), "z edge column {i}");
        assert_eq!(a.mesh.vertices[n * side + i].normal, c.mesh.vertices[i].normal);
        assert_eq!(a.cell(i, n).biome, c.cell(i, 0).biome, "biome seam at column {i}");
        assert_eq!(a.cell(i, n).is_water, c.cell(i, 0).is_water, "water seam at column {i}");
    }
}

#[test]
fn test_load_order_does_not_change_chunks() {
    let config = alpha(1, 2);
    let mut direct = manager(&config);
    direct.update(2600.0, -2600.0).unwrap();

    let mut walked = manager(&config);
    walked.update(1600.0, -2600.0).unwrap();
    walked.update(2600.0, -2600.0).unwrap();

    let coord = ChunkCoord::containing(2600.0, -2600.0, 512.0);
    let a = direct.chunk(coord).unwrap();
    let b = walked.chunk(coord).unwrap();
    assert_eq!(a.heights, b.heights);
    assert_eq!(a.entrances, b.entrances);
    assert_eq!(a.mesh, b.mesh);
}

#[test]
fn test_parallel_workers_match_synchronous() {
    let mut config = alpha(1, 2);
    config.world.generation_workers = 1;
    let mut sync = manager(&config);
    config.world.generation_workers = 4;
    let mut parallel = manager(&config);

    let a = sync.update(-3000.0, 700.0).unwrap();
    let b = parallel.update(-3000.0, 700.0).unwrap();
    assert_eq!(a, b);
    for coord in sync.loaded_coords() {
        assert_eq!(sync.chunk(coord).unwrap().heights, parallel.chunk(coord).unwrap().heights);
    }
}

#[test]
fn test_loaded_queries_track_direct_computation() {
    let mut mgr = manager(&alpha(1, 2));
    mgr.update(4100.0, 4100.0).unwrap();
    let generator = Arc::clone(mgr.generator());

    let cell = 512.0 / 48.0;
    for k in 0..10 {
        // Midpoints of cells: interpolation differs from the exact surface by
        // at most the local relief of one cell.
        let x = 4096.0 + (f64::from(k) * 4.0 + 0.5) * cell;
        let z = 4096.0 + (f64::from(k) * 3.0 + 0.5) * cell;
        let interpolated = mgr.height_at(x, z);
        let exact = generator.height_at(x, z).elevation;
        assert!((interpolated - exact).abs() < 60.0, "({x}, {z}): {interpolated} vs {exact}");
    }
}
