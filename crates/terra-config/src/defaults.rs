//! Named default values for every configuration field.
//!
//! A field missing from `world.ron` falls back to the constant here.

// --- World / streaming ---

/// Default world seed text.
pub const DEFAULT_SEED: &str = "terra";
/// Edge length of a square chunk in world units.
pub const DEFAULT_CHUNK_SIZE: f64 = 512.0;
/// Grid cells per chunk edge; the grid has `resolution + 1` vertices per edge.
pub const DEFAULT_GRID_RESOLUTION: u32 = 48;
/// Chunks within this distance (in chunks) of the observer are loaded.
pub const DEFAULT_RENDER_DISTANCE: u32 = 6;
/// Chunks beyond this distance (in chunks) of the observer are released.
pub const DEFAULT_UNLOAD_DISTANCE: u32 = 8;
/// Elevation of the ocean surface.
pub const DEFAULT_SEA_LEVEL: f64 = 0.0;
/// Elevation above which vertex colours fade to snow.
pub const DEFAULT_SNOW_LINE: f64 = 520.0;
/// Worker threads for chunk generation (`0` = one per CPU, `1` = synchronous).
pub const DEFAULT_GENERATION_WORKERS: usize = 1;

// --- Height field ---

/// Number of fBm octaves in the base elevation.
pub const DEFAULT_OCTAVES: u32 = 6;
/// Amplitude multiplier between octaves.
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
/// Frequency multiplier between octaves.
pub const DEFAULT_LACUNARITY: f64 = 2.0;
/// Frequency of the first base-elevation octave.
pub const DEFAULT_BASE_FREQUENCY: f64 = 0.0012;
/// Scale applied to the normalised base elevation.
pub const DEFAULT_HILL_HEIGHT: f64 = 90.0;
/// Base frequency of the climate noise fields.
pub const DEFAULT_CLIMATE_FREQUENCY: f64 = 0.00035;
/// Radius around the origin that is flattened into a walkable spawn area.
pub const DEFAULT_PLATEAU_RADIUS: f64 = 384.0;
/// Distance from the origin where ridged mountains begin.
pub const DEFAULT_MOUNTAIN_START_RADIUS: f64 = 2048.0;
/// Width of the smoothstep ramp that fades mountains in.
pub const DEFAULT_MOUNTAIN_TRANSITION: f64 = 2048.0;
/// Peak height added by ridged mountains at full strength.
pub const DEFAULT_MOUNTAIN_HEIGHT: f64 = 700.0;
/// Frequency of the ridged mountain noise.
pub const DEFAULT_MOUNTAIN_FREQUENCY: f64 = 0.00045;
/// Frequency of the river channel noise.
pub const DEFAULT_RIVER_FREQUENCY: f64 = 0.0007;
/// Half-width of a river channel in noise units.
pub const DEFAULT_RIVER_WIDTH: f64 = 0.025;

// --- Caves ---

/// Maximum worm origins a single chunk may spawn.
pub const DEFAULT_MAX_WORMS_PER_CHUNK: u32 = 2;
/// Probability of each potential worm origin actually spawning.
pub const DEFAULT_WORM_SPAWN_CHANCE: f64 = 0.4;
/// Segments traced per worm.
pub const DEFAULT_WORM_SEGMENTS: u32 = 96;
/// Distance advanced per segment.
pub const DEFAULT_WORM_STEP_LENGTH: f64 = 5.0;
/// Mean tunnel radius.
pub const DEFAULT_WORM_BASE_RADIUS: f64 = 5.0;
/// Amplitude of the sinusoidal radius variation.
pub const DEFAULT_WORM_RADIUS_VARIATION: f64 = 2.0;
/// Fraction of the noise direction blended in per segment.
pub const DEFAULT_WORM_DIRECTION_BLEND: f64 = 0.2;
/// Frequency of the direction noise.
pub const DEFAULT_WORM_NOISE_FREQUENCY: f64 = 0.012;
/// Period, in segments, of the vertical undulation.
pub const DEFAULT_WORM_UNDULATION_PERIOD: f64 = 28.0;
/// Strength of the vertical undulation.
pub const DEFAULT_WORM_UNDULATION_STRENGTH: f64 = 0.25;
/// Per-segment chance of an upward surge.
pub const DEFAULT_WORM_SURGE_CHANCE: f64 = 0.03;
/// Upward push applied by a surge.
pub const DEFAULT_WORM_SURGE_STRENGTH: f64 = 0.6;
/// Shallowest spawn depth below the surface.
pub const DEFAULT_WORM_MIN_DEPTH: f64 = 10.0;
/// Deepest a worm may travel below the surface.
pub const DEFAULT_WORM_MAX_DEPTH: f64 = 90.0;
/// How far a worm may rise above the surface before being turned back down.
pub const DEFAULT_WORM_SURFACE_OVERSHOOT: f64 = 4.0;
/// Per-segment chance of spawning a branch.
pub const DEFAULT_BRANCH_CHANCE: f64 = 0.015;
/// Segments at either end of a path where branching is suppressed.
pub const DEFAULT_BRANCH_MARGIN: u32 = 20;
/// Maximum branches per worm.
pub const DEFAULT_MAX_BRANCHES: u32 = 3;
/// Maximum depth of the worm centre below the surface for an entrance.
pub const DEFAULT_ENTRANCE_REACH: f64 = 14.0;
/// Entrance bowl radius as a multiple of the tunnel radius.
pub const DEFAULT_ENTRANCE_RADIUS_SCALE: f64 = 1.8;
/// Deepest carve an entrance bowl may make.
pub const DEFAULT_MAX_CARVE_DEPTH: f64 = 24.0;

// --- Debug ---

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";
