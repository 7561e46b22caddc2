//! Worm origins per chunk, entrance ownership, and neighbourhood queries.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::{Rng, RngCore};
use terra_config::CaveConfig;
use tracing::trace;

use super::entrance::{CaveEntrance, merge_entrances};
use super::worm::{WormNoise, WormOrigin, WormPath, heading, trace_worm};
use crate::coords::ChunkCoord;
use crate::seed::{WorldSeed, hash_coords, salt, seeded_rng};

/// Largest initial pitch of a fresh worm.
const MAX_START_PITCH: f64 = 0.3;

/// Traces worms and turns their surface crossings into entrance bowls.
///
/// Entrance ownership: a candidate belongs to the chunk containing its
/// centre. Each owner merges its own candidates, and a chunk sees the owned
/// entrances of its 3x3 neighbourhood whose bowls reach into it. Two adjacent
/// chunks therefore agree on every bowl near their shared edge.
pub struct CaveCarver {
    config: CaveConfig,
    seed: u64,
    noise: WormNoise,
    chunk_size: f64,
    plateau_radius: f64,
    check_radius: i32,
}

impl CaveCarver {
    pub fn new(seed: WorldSeed, config: &CaveConfig, chunk_size: f64, plateau_radius: f64) -> Self {
        let check_radius = (config.max_reach() / chunk_size).floor() as i32 + 1;
        Self {
            config: config.clone(),
            seed: seed.derive(salt::CAVE_ORIGIN),
            noise: WormNoise::new(seed, config.noise_frequency),
            chunk_size,
            plateau_radius,
            check_radius,
        }
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// How many chunks away a worm origin can still leave a candidate.
    pub fn check_radius(&self) -> i32 {
        self.check_radius
    }

    /// Worm origins seeded by `coord`. Between zero and `max_worms_per_chunk`.
    pub fn origins_for_chunk<S: Fn(f64, f64) -> f64>(
        &self,
        coord: ChunkCoord,
        surface: &S,
    ) -> Vec<WormOrigin> {
        let cfg = &self.config;
        let mut rng = seeded_rng(hash_coords(self.seed, coord.cx, coord.cz));
        let (x0, z0) = coord.origin(self.chunk_size);
        let mut origins = Vec::new();

        for _ in 0..cfg.max_worms_per_chunk {
            if !rng.random_bool(cfg.spawn_chance) {
                continue;
            }
            let x = x0 + rng.random_range(0.0..self.chunk_size);
            let z = z0 + rng.random_range(0.0..self.chunk_size);
            let depth = rng.random_range(cfg.min_depth..=cfg.max_depth);
            let yaw = rng.random_range(0.0..TAU);
            let pitch = rng.random_range(-MAX_START_PITCH..=MAX_START_PITCH);
            let seed = rng.next_u64();
            origins.push(WormOrigin {
                chunk: coord,
                position: DVec3::new(x, surface(x, z) - depth, z),
                direction: heading(yaw, pitch),
                seed,
            });
        }
        origins
    }

    /// Every path (main tunnels and branches) of the worms seeded by `coord`.
    pub fn trace_worms_for_chunk<S: Fn(f64, f64) -> f64>(
        &self,
        coord: ChunkCoord,
        surface: &S,
    ) -> Vec<WormPath> {
        let paths: Vec<WormPath> = self
            .origins_for_chunk(coord, surface)
            .into_iter()
            .flat_map(|origin| trace_worm(origin, &self.config, &self.noise, surface))
            .collect();
        trace!(
            cx = coord.cx,
            cz = coord.cz,
            paths = paths.len(),
            "traced cave worms"
        );
        paths
    }

    /// Entrance candidate for each segment that reaches the surface.
    pub fn entrance_candidates(&self, path: &WormPath) -> impl Iterator<Item = CaveEntrance> {
        let cfg = &self.config;
        path.segments.iter().filter_map(move |seg| {
            let below = seg.depth();
            if below < -seg.radius || below > cfg.entrance_reach {
                return None;
            }
            Some(CaveEntrance {
                x: seg.position.x,
                z: seg.position.z,
                radius: seg.radius * cfg.entrance_radius_scale,
                carve_depth: (below.max(0.0) + seg.radius * 0.5).min(cfg.max_carve_depth),
            })
        })
    }

    /// Unmerged candidates from all worms seeded by `coord`, in trace order.
    pub fn candidates_from_origin_chunk<S: Fn(f64, f64) -> f64>(
        &self,
        coord: ChunkCoord,
        surface: &S,
    ) -> Vec<CaveEntrance> {
        self.trace_worms_for_chunk(coord, surface)
            .iter()
            .flat_map(|path| self.entrance_candidates(path))
            .collect()
    }

    /// Merged entrances owned by `owner`.
    ///
    /// `candidates_of` yields the unmerged candidates of one origin chunk; it
    /// lets callers memoise worm traces. Origins are visited in row-major
    /// order so the result never depends on who asks first.
    pub fn owned_entrances<C, F>(
        &self,
        owner: ChunkCoord,
        mut candidates_of: F,
    ) -> Vec<CaveEntrance>
    where
        C: AsRef<[CaveEntrance]>,
        F: FnMut(ChunkCoord) -> C,
    {
        let r = self.check_radius;
        let mut owned = Vec::new();
        for dz in -r..=r {
            for dx in -r..=r {
                let candidates = candidates_of(owner.offset(dx, dz));
                owned.extend(candidates.as_ref().iter().copied().filter(|e| {
                    ChunkCoord::containing(e.x, e.z, self.chunk_size) == owner
                }));
            }
        }
        merge_entrances(owned)
            .into_iter()
            .filter(|e| !self.reaches_plateau(e))
            .collect()
    }

    /// Entrances whose bowl overlaps `coord` grown by `margin` on every side,
    /// given each neighbour's owned set.
    ///
    /// Only the 3x3 owners are consulted, so `margin` should stay well below
    /// a chunk; meshing uses one grid cell to cover its normal apron.
    pub fn entrances_near_chunk_with<C, F>(
        &self,
        coord: ChunkCoord,
        margin: f64,
        mut owned_of: F,
    ) -> Vec<CaveEntrance>
    where
        C: AsRef<[CaveEntrance]>,
        F: FnMut(ChunkCoord) -> C,
    {
        let (min_x, min_z, max_x, max_z) = coord.bounds(self.chunk_size);
        let (min_x, min_z) = (min_x - margin, min_z - margin);
        let (max_x, max_z) = (max_x + margin, max_z + margin);
        let mut result = Vec::new();
        for dz in -1..=1 {
            for dx in -1..=1 {
                let owned = owned_of(coord.offset(dx, dz));
                result.extend(
                    owned
                        .as_ref()
                        .iter()
                        .copied()
                        .filter(|e| e.touches_rect(min_x, min_z, max_x, max_z)),
                );
            }
        }
        result
    }

    /// Entrances whose bowl overlaps `coord`, computed from scratch.
    pub fn entrances_near_chunk<S: Fn(f64, f64) -> f64>(
        &self,
        coord: ChunkCoord,
        surface: &S,
    ) -> Vec<CaveEntrance> {
        // Owners overlap heavily in the origins they scan; trace each origin once.
        let r = self.check_radius + 1;
        let mut traced: Vec<(ChunkCoord, Vec<CaveEntrance>)> = Vec::new();
        for dz in -r..=r {
            for dx in -r..=r {
                let origin = coord.offset(dx, dz);
                traced.push((origin, self.candidates_from_origin_chunk(origin, surface)));
            }
        }
        let lookup = |c: ChunkCoord| {
            traced
                .iter()
                .find(|(o, _)| *o == c)
                .map(|(_, v)| v.as_slice())
                .unwrap_or(&[])
        };

        self.entrances_near_chunk_with(coord, 0.0, |owner| self.owned_entrances(owner, lookup))
    }

    fn reaches_plateau(&self, e: &CaveEntrance) -> bool {
        let limit = self.plateau_radius + e.radius;
        e.x.hypot(e.z) < limit
    }
}
