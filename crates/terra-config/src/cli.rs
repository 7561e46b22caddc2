//! Command-line argument parsing for the Terra driver.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terra command-line arguments.
///
/// CLI values override settings loaded from `world.ron`.
#[derive(Parser, Debug)]
#[command(name = "terra", about = "Seeded infinite terrain generator")]
pub struct CliArgs {
    /// World seed (integer or any text).
    #[arg(long)]
    pub seed: Option<String>,

    /// Chunk edge length in world units.
    #[arg(long)]
    pub chunk_size: Option<f64>,

    /// Grid cells per chunk edge.
    #[arg(long)]
    pub grid_resolution: Option<u32>,

    /// Render distance in chunks.
    #[arg(long)]
    pub render_distance: Option<u32>,

    /// Unload distance in chunks.
    #[arg(long)]
    pub unload_distance: Option<u32>,

    /// Chunk generation threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of streaming updates to simulate while walking the observer.
    #[arg(long, default_value_t = 40)]
    pub walk: u32,

    /// Observer speed in world units per second.
    #[arg(long, default_value_t = 180.0)]
    pub speed: f64,

    /// Write a biome/height debug map PNG to this path.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Debug map edge length in pixels.
    #[arg(long, default_value_t = 256)]
    pub map_size: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref seed) = args.seed {
            self.world.seed = seed.clone();
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_size = size;
        }
        if let Some(res) = args.grid_resolution {
            self.world.grid_resolution = res;
        }
        if let Some(rd) = args.render_distance {
            self.world.render_distance = rd;
            if args.unload_distance.is_none() && self.world.unload_distance < rd {
                self.world.unload_distance = rd + 2;
            }
        }
        if let Some(ud) = args.unload_distance {
            self.world.unload_distance = ud;
        }
        if let Some(workers) = args.workers {
            self.world.generation_workers = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs::parse_from(["terra"])
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some("alpha".to_string()),
            chunk_size: Some(256.0),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, "alpha");
        assert_eq!(config.world.chunk_size, 256.0);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.grid_resolution, 48);
        assert_eq!(config.world.render_distance, 6);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_render_distance_override_keeps_unload_outside() {
        let mut config = Config::default();
        let args = CliArgs {
            render_distance: Some(12),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.render_distance, 12);
        assert_eq!(config.world.unload_distance, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "terra",
            "--seed",
            "12345",
            "--workers",
            "0",
            "--walk",
            "5",
            "--map",
            "out.png",
        ]);
        assert_eq!(args.seed.as_deref(), Some("12345"));
        assert_eq!(args.workers, Some(0));
        assert_eq!(args.walk, 5);
        assert_eq!(args.map, Some(PathBuf::from("out.png")));
        assert_eq!(args.map_size, 256);
    }
}
