//! Worm path tracing.

use std::f64::consts::TAU;

use glam::DVec3;
use noise::{NoiseFn, Simplex};
use rand::Rng;
use terra_config::CaveConfig;

use crate::coords::ChunkCoord;
use crate::seed::{WorldSeed, derive_seed, det_cos, det_sin, salt, seeded_rng};

/// Frequency of the sinusoidal radius variation, in radians per segment.
const RADIUS_WAVE: f64 = 0.21;
/// Scale of the noise jitter added to the radius. Kept below 1 so radii stay
/// within [`CaveConfig::max_radius`].
const RADIUS_JITTER: f64 = 0.75;
/// Smallest radius as a fraction of the base radius.
const MIN_RADIUS_FRACTION: f64 = 0.35;
/// Vertical component forced when a worm leaves its depth band.
const BAND_CORRECTION: f64 = 0.25;
/// Largest vertical component of the direction before renormalising.
const MAX_PITCH: f64 = 0.7;

/// Where and how a worm starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WormOrigin {
    /// Chunk whose seed produced this origin.
    pub chunk: ChunkCoord,
    pub position: DVec3,
    /// Initial unit direction.
    pub direction: DVec3,
    /// Seed for every random decision along the path.
    pub seed: u64,
}

/// One step of a worm's centerline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WormSegment {
    pub position: DVec3,
    pub radius: f64,
    /// Pre-cave surface elevation above this segment.
    pub surface: f64,
}

impl WormSegment {
    /// Depth of the centerline below the surface. Negative above ground.
    pub fn depth(&self) -> f64 {
        self.surface - self.position.y
    }
}

/// The centerline produced by one trace, main tunnel or branch.
#[derive(Clone, Debug, PartialEq)]
pub struct WormPath {
    pub origin: WormOrigin,
    pub segments: Vec<WormSegment>,
    pub is_branch: bool,
}

/// Noise fields shared by every worm of a world.
pub(super) struct WormNoise {
    dir_x: Simplex,
    dir_y: Simplex,
    dir_z: Simplex,
    radius: Simplex,
    frequency: f64,
}

impl WormNoise {
    pub(super) fn new(seed: WorldSeed, frequency: f64) -> Self {
        let base = seed.derive(salt::CAVE_NOISE);
        let field = |i: u64| Simplex::new(WorldSeed::from(derive_seed(base, i)).noise_seed(0));
        Self {
            dir_x: field(1),
            dir_y: field(2),
            dir_z: field(3),
            radius: field(4),
            frequency,
        }
    }

    fn point(&self, p: DVec3) -> [f64; 3] {
        [p.x * self.frequency, p.y * self.frequency, p.z * self.frequency]
    }

    fn direction(&self, p: DVec3) -> DVec3 {
        let q = self.point(p);
        // Vertical steering is damped so worms wander mostly sideways.
        DVec3::new(self.dir_x.get(q), self.dir_y.get(q) * 0.5, self.dir_z.get(q))
    }

    fn radius_jitter(&self, p: DVec3) -> f64 {
        self.radius.get(self.point(p))
    }
}

/// Unit horizontal direction from a yaw angle, tilted by `pitch`.
pub(super) fn heading(yaw: f64, pitch: f64) -> DVec3 {
    normalize_or_forward(DVec3::new(det_cos(yaw), pitch, det_sin(yaw)))
}

fn normalize_or_forward(v: DVec3) -> DVec3 {
    let len = v.length();
    if len > 1e-9 { v / len } else { DVec3::X }
}

struct Tracer<'a, S> {
    config: &'a CaveConfig,
    noise: &'a WormNoise,
    surface: &'a S,
}

impl<S: Fn(f64, f64) -> f64> Tracer<'_, S> {
    /// Trace one worm. Returns the path and, when branching is allowed, the
    /// origins of the branches it spawned.
    fn trace(
        &self,
        origin: WormOrigin,
        segments: u32,
        can_branch: bool,
    ) -> (WormPath, Vec<WormOrigin>) {
        let cfg = self.config;
        let mut rng = seeded_rng(origin.seed);
        let phase = rng.random_range(0.0..TAU);

        let mut pos = origin.position;
        let mut dir = origin.direction;
        let mut path = Vec::with_capacity(segments as usize);
        let mut branches = Vec::new();

        for step in 0..segments {
            pos += dir * cfg.step_length;
            let surface = (self.surface)(pos.x, pos.z);
            let depth = surface - pos.y;
            let s = f64::from(step);

            let radius = (cfg.base_radius
                + det_sin(s * RADIUS_WAVE + phase) * cfg.radius_variation
                + self.noise.radius_jitter(pos) * RADIUS_JITTER)
                .max(cfg.base_radius * MIN_RADIUS_FRACTION);
            path.push(WormSegment {
                position: pos,
                radius,
                surface,
            });

            let wander = self.noise.direction(pos);
            if wander.length_squared() > 1e-12 {
                dir = dir.lerp(wander.normalize(), cfg.direction_blend);
            }
            dir.y += det_sin(s / cfg.undulation_period * TAU + phase)
                * cfg.undulation_strength
                * cfg.direction_blend;
            if rng.random_bool(cfg.surge_chance) {
                dir.y += cfg.surge_strength;
            }

            if depth > cfg.max_depth {
                dir.y = dir.y.max(BAND_CORRECTION);
            } else if depth < -cfg.surface_overshoot {
                dir.y = dir.y.min(-BAND_CORRECTION);
            }
            dir.y = dir.y.clamp(-MAX_PITCH, MAX_PITCH);
            dir = normalize_or_forward(dir);

            let in_window = step >= cfg.branch_margin && step + cfg.branch_margin < segments;
            if can_branch
                && in_window
                && (branches.len() as u32) < cfg.max_branches
                && rng.random_bool(cfg.branch_chance)
            {
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let perpendicular = normalize_or_forward(DVec3::new(-dir.z, 0.0, dir.x) * side);
                branches.push(WormOrigin {
                    chunk: origin.chunk,
                    position: pos,
                    direction: perpendicular,
                    seed: derive_seed(origin.seed, u64::from(step) + 1),
                });
            }
        }

        let path = WormPath {
            origin,
            segments: path,
            is_branch: !can_branch,
        };
        (path, branches)
    }
}

/// Trace a worm and all of its branches. The main path comes first, then
/// branches in the order they were spawned.
pub(super) fn trace_worm<S: Fn(f64, f64) -> f64>(
    origin: WormOrigin,
    config: &CaveConfig,
    noise: &WormNoise,
    surface: &S,
) -> Vec<WormPath> {
    let tracer = Tracer {
        config,
        noise,
        surface,
    };
    let (main, branch_origins) = tracer.trace(origin, config.segments, true);
    let mut paths = Vec::with_capacity(1 + branch_origins.len());
    paths.push(main);
    for branch in branch_origins {
        let (path, _) = tracer.trace(branch, config.segments / 2, false);
        paths.push(path);
    }
    paths
}
