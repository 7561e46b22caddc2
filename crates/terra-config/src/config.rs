//! Configuration structs with named defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::*;
use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "world.ron";

/// Top-level world configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Seed, chunk layout, and streaming settings.
    pub world: WorldConfig,
    /// Height field and climate noise settings.
    pub terrain: TerrainConfig,
    /// Cave worm settings.
    pub caves: CaveConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Seed, chunk layout, and streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. Decimal integers are used as-is, any other text is hashed.
    pub seed: String,
    /// Edge length of a chunk in world units.
    pub chunk_size: f64,
    /// Grid cells per chunk edge.
    pub grid_resolution: u32,
    /// Load radius around the observer, in chunks.
    pub render_distance: u32,
    /// Release radius around the observer, in chunks. Must be >= `render_distance`.
    pub unload_distance: u32,
    /// Ocean surface elevation.
    pub sea_level: f64,
    /// Elevation above which terrain is tinted as snow.
    pub snow_line: f64,
    /// Chunk generation threads (`0` = one per CPU, `1` = synchronous).
    pub generation_workers: usize,
}

/// Height field and climate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Frequency of the first octave.
    pub base_frequency: f64,
    /// Scale of the normalised base elevation.
    pub hill_height: f64,
    /// Base frequency of the climate fields.
    pub climate_frequency: f64,
    /// Flattened spawn area radius around the origin.
    pub plateau_radius: f64,
    /// Distance from the origin where mountains begin.
    pub mountain_start_radius: f64,
    /// Width of the mountain fade-in ramp.
    pub mountain_transition: f64,
    /// Peak mountain contribution.
    pub mountain_height: f64,
    /// Frequency of the ridged mountain noise.
    pub mountain_frequency: f64,
    /// Frequency of the river channel noise.
    pub river_frequency: f64,
    /// Half-width of a river channel in noise units.
    pub river_width: f64,
}

/// Cave worm configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaveConfig {
    /// Maximum worm origins per chunk.
    pub max_worms_per_chunk: u32,
    /// Probability of each potential origin spawning.
    pub spawn_chance: f64,
    /// Segments per worm.
    pub segments: u32,
    /// Distance advanced per segment.
    pub step_length: f64,
    /// Mean tunnel radius.
    pub base_radius: f64,
    /// Sinusoidal radius variation.
    pub radius_variation: f64,
    /// Direction blend factor toward the noise direction, in `(0, 1]`.
    pub direction_blend: f64,
    /// Frequency of the direction noise.
    pub noise_frequency: f64,
    /// Vertical undulation period in segments.
    pub undulation_period: f64,
    /// Vertical undulation strength.
    pub undulation_strength: f64,
    /// Per-segment upward surge chance.
    pub surge_chance: f64,
    /// Upward surge strength.
    pub surge_strength: f64,
    /// Shallowest origin depth below the surface.
    pub min_depth: f64,
    /// Deepest allowed depth below the surface.
    pub max_depth: f64,
    /// Allowed rise above the surface before turning back down.
    pub surface_overshoot: f64,
    /// Per-segment branch chance.
    pub branch_chance: f64,
    /// Segments at either end of a path where branching is suppressed.
    pub branch_margin: u32,
    /// Maximum branches per worm.
    pub max_branches: u32,
    /// Maximum worm centre depth below the surface that still opens an entrance.
    pub entrance_reach: f64,
    /// Entrance bowl radius relative to tunnel radius.
    pub entrance_radius_scale: f64,
    /// Deepest carve of an entrance bowl.
    pub max_carve_depth: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "terra_world=trace").
    pub log_level: String,
    /// Also write JSON logs to the log directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            render_distance: DEFAULT_RENDER_DISTANCE,
            unload_distance: DEFAULT_UNLOAD_DISTANCE,
            sea_level: DEFAULT_SEA_LEVEL,
            snow_line: DEFAULT_SNOW_LINE,
            generation_workers: DEFAULT_GENERATION_WORKERS,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            base_frequency: DEFAULT_BASE_FREQUENCY,
            hill_height: DEFAULT_HILL_HEIGHT,
            climate_frequency: DEFAULT_CLIMATE_FREQUENCY,
            plateau_radius: DEFAULT_PLATEAU_RADIUS,
            mountain_start_radius: DEFAULT_MOUNTAIN_START_RADIUS,
            mountain_transition: DEFAULT_MOUNTAIN_TRANSITION,
            mountain_height: DEFAULT_MOUNTAIN_HEIGHT,
            mountain_frequency: DEFAULT_MOUNTAIN_FREQUENCY,
            river_frequency: DEFAULT_RIVER_FREQUENCY,
            river_width: DEFAULT_RIVER_WIDTH,
        }
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            max_worms_per_chunk: DEFAULT_MAX_WORMS_PER_CHUNK,
            spawn_chance: DEFAULT_WORM_SPAWN_CHANCE,
            segments: DEFAULT_WORM_SEGMENTS,
            step_length: DEFAULT_WORM_STEP_LENGTH,
            base_radius: DEFAULT_WORM_BASE_RADIUS,
            radius_variation: DEFAULT_WORM_RADIUS_VARIATION,
            direction_blend: DEFAULT_WORM_DIRECTION_BLEND,
            noise_frequency: DEFAULT_WORM_NOISE_FREQUENCY,
            undulation_period: DEFAULT_WORM_UNDULATION_PERIOD,
            undulation_strength: DEFAULT_WORM_UNDULATION_STRENGTH,
            surge_chance: DEFAULT_WORM_SURGE_CHANCE,
            surge_strength: DEFAULT_WORM_SURGE_STRENGTH,
            min_depth: DEFAULT_WORM_MIN_DEPTH,
            max_depth: DEFAULT_WORM_MAX_DEPTH,
            surface_overshoot: DEFAULT_WORM_SURFACE_OVERSHOOT,
            branch_chance: DEFAULT_BRANCH_CHANCE,
            branch_margin: DEFAULT_BRANCH_MARGIN,
            max_branches: DEFAULT_MAX_BRANCHES,
            entrance_reach: DEFAULT_ENTRANCE_REACH,
            entrance_radius_scale: DEFAULT_ENTRANCE_RADIUS_SCALE,
            max_carve_depth: DEFAULT_MAX_CARVE_DEPTH,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: false,
        }
    }
}

impl CaveConfig {
    /// Largest tunnel radius a worm can produce.
    pub fn max_radius(&self) -> f64 {
        self.base_radius + self.radius_variation.abs() + 1.0
    }

    /// Largest entrance bowl radius a worm can produce.
    pub fn max_entrance_radius(&self) -> f64 {
        self.max_radius() * self.entrance_radius_scale
    }

    /// Upper bound on the horizontal distance a worm (including its branches)
    /// can travel from its origin.
    pub fn max_reach(&self) -> f64 {
        let branch_segments = if self.max_branches > 0 {
            self.segments / 2
        } else {
            0
        };
        f64::from(self.segments + branch_segments) * self.step_length
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Resolve the default config directory for this platform.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("terra"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `world.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("chunk_size: 512.0"));
        assert!(ron_str.contains("grid_resolution: 48"));
    }

    #[test]
    fn test_missing_field_uses_named_default() {
        let ron_str = "(world: (seed: \"alpha\"))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, "alpha");
        assert_eq!(config.world.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.world.render_distance, DEFAULT_RENDER_DISTANCE);
        assert_eq!(config.terrain, TerrainConfig::default());
        assert_eq!(config.caves, CaveConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true, world: (also_new: 3))";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = "alpha".to_string();
        config.world.render_distance = 3;
        config.caves.segments = 64;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.sea_level = 12.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().world.sea_level, 12.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_max_reach_covers_branches() {
        let caves = CaveConfig {
            segments: 100,
            step_length: 5.0,
            max_branches: 2,
            ..Default::default()
        };
        assert_eq!(caves.max_reach(), 750.0);

        let no_branches = CaveConfig {
            max_branches: 0,
            ..caves
        };
        assert_eq!(no_branches.max_reach(), 500.0);
    }
}
