//! Per-vertex colour: biome base colour shaded by elevation.

pub const SAND_COLOR: [f32; 3] = [0.86, 0.80, 0.56];
pub const SNOW_COLOR: [f32; 3] = [0.95, 0.96, 0.98];
pub const WATER_COLOR: [f32; 3] = [0.16, 0.36, 0.66];

/// Height above sea level over which the shoreline fades from sand.
const SHORE_BAND: f64 = 4.0;
/// Height above the snow line over which rock fades to full snow.
const SNOW_BAND: f64 = 80.0;

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [0, 1, 2].map(|k| a[k] * (1.0 - t) + b[k] * t)
}

/// Shade `base` toward sand just above sea level and toward snow above
/// `snow_line`. Submerged vertices are darkened with depth.
pub fn shade_color(base: [f32; 3], elevation: f64, sea_level: f64, snow_line: f64) -> [f32; 3] {
    let above = elevation - sea_level;
    if above < 0.0 {
        let t = (-above / 60.0).clamp(0.0, 0.6) as f32;
        return lerp(lerp(base, SAND_COLOR, 0.5), [0.05, 0.08, 0.12], t);
    }
    if above < SHORE_BAND {
        let t = (1.0 - above / SHORE_BAND) as f32;
        return lerp(base, SAND_COLOR, t);
    }
    if elevation > snow_line {
        let t = ((elevation - snow_line) / SNOW_BAND).clamp(0.0, 1.0) as f32;
        return lerp(base, SNOW_COLOR, t);
    }
    base
}
