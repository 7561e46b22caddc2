//! Fail-fast validation of a loaded configuration.
//!
//! Runs once at world-construction time. Anything rejected here would
//! otherwise propagate into every generated chunk.

use crate::config::{CaveConfig, Config, TerrainConfig, WorldConfig};
use crate::error::ConfigError;

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and >= 0, got {value}")))
    }
}

fn require_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

impl Config {
    /// Check every field the generator depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.terrain.validate()?;
        self.caves.validate(&self.world)?;
        Ok(())
    }
}

impl WorldConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require_positive("world.chunk_size", self.chunk_size)?;
        if self.grid_resolution == 0 {
            return Err(invalid("world.grid_resolution", "must be at least 1"));
        }
        if f64::from(self.grid_resolution) > self.chunk_size {
            return Err(invalid(
                "world.grid_resolution",
                format!(
                    "{} cells do not fit in a chunk of size {}",
                    self.grid_resolution, self.chunk_size
                ),
            ));
        }
        if self.unload_distance < self.render_distance {
            return Err(invalid(
                "world.unload_distance",
                format!(
                    "must be >= render_distance ({}), got {}",
                    self.render_distance, self.unload_distance
                ),
            ));
        }
        if !self.sea_level.is_finite() {
            return Err(invalid("world.sea_level", "must be finite"));
        }
        if !self.snow_line.is_finite() {
            return Err(invalid("world.snow_line", "must be finite"));
        }
        Ok(())
    }
}

impl TerrainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(invalid("terrain.octaves", "must be at least 1"));
        }
        require_positive("terrain.persistence", self.persistence)?;
        require_positive("terrain.lacunarity", self.lacunarity)?;
        require_positive("terrain.base_frequency", self.base_frequency)?;
        require_non_negative("terrain.hill_height", self.hill_height)?;
        require_positive("terrain.climate_frequency", self.climate_frequency)?;
        require_non_negative("terrain.plateau_radius", self.plateau_radius)?;
        require_non_negative("terrain.mountain_start_radius", self.mountain_start_radius)?;
        if self.mountain_start_radius < self.plateau_radius {
            return Err(invalid(
                "terrain.mountain_start_radius",
                format!(
                    "must be >= plateau_radius ({}), got {}",
                    self.plateau_radius, self.mountain_start_radius
                ),
            ));
        }
        require_positive("terrain.mountain_transition", self.mountain_transition)?;
        require_non_negative("terrain.mountain_height", self.mountain_height)?;
        require_positive("terrain.mountain_frequency", self.mountain_frequency)?;
        require_positive("terrain.river_frequency", self.river_frequency)?;
        require_non_negative("terrain.river_width", self.river_width)?;
        Ok(())
    }
}

impl CaveConfig {
    fn validate(&self, world: &WorldConfig) -> Result<(), ConfigError> {
        require_probability("caves.spawn_chance", self.spawn_chance)?;
        if self.segments == 0 {
            return Err(invalid("caves.segments", "must be at least 1"));
        }
        require_positive("caves.step_length", self.step_length)?;
        require_positive("caves.base_radius", self.base_radius)?;
        require_non_negative("caves.radius_variation", self.radius_variation)?;
        if !(self.direction_blend > 0.0 && self.direction_blend <= 1.0) {
            return Err(invalid(
                "caves.direction_blend",
                format!("must be within (0, 1], got {}", self.direction_blend),
            ));
        }
        require_positive("caves.noise_frequency", self.noise_frequency)?;
        require_positive("caves.undulation_period", self.undulation_period)?;
        require_non_negative("caves.undulation_strength", self.undulation_strength)?;
        require_probability("caves.surge_chance", self.surge_chance)?;
        require_non_negative("caves.surge_strength", self.surge_strength)?;
        require_non_negative("caves.min_depth", self.min_depth)?;
        require_positive("caves.max_depth", self.max_depth)?;
        if self.min_depth > self.max_depth {
            return Err(invalid(
                "caves.min_depth",
                format!("must be <= max_depth ({}), got {}", self.max_depth, self.min_depth),
            ));
        }
        require_non_negative("caves.surface_overshoot", self.surface_overshoot)?;
        require_probability("caves.branch_chance", self.branch_chance)?;
        require_non_negative("caves.entrance_reach", self.entrance_reach)?;
        require_positive("caves.entrance_radius_scale", self.entrance_radius_scale)?;
        require_positive("caves.max_carve_depth", self.max_carve_depth)?;

        // Bowls are looked up in the 3x3 chunk neighbourhood only.
        if self.max_entrance_radius() >= world.chunk_size {
            return Err(invalid(
                "caves.entrance_radius_scale",
                format!(
                    "entrance bowls up to {:.1} units wide must be smaller than a chunk ({})",
                    self.max_entrance_radius(),
                    world.chunk_size
                ),
            ));
        }
        Ok(())
    }
}
