//! Top-down map renderers: elevation, biome, and cave entrance overlay.

use super::image::DebugImage;
use crate::cave::CaveEntrance;
use crate::generator::TerrainGenerator;

/// Axis-aligned world rectangle mapped onto an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRegion {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl MapRegion {
    /// Square region of half-width `half_extent` centred on `(x, z)`.
    pub fn centered(x: f64, z: f64, half_extent: f64) -> Self {
        Self {
            min_x: x - half_extent,
            min_z: z - half_extent,
            max_x: x + half_extent,
            max_z: z + half_extent,
        }
    }

    /// World position at the centre of pixel `(px, py)`.
    fn world_at(&self, px: u32, py: u32, width: u32, height: u32) -> (f64, f64) {
        let u = (f64::from(px) + 0.5) / f64::from(width);
        let v = (f64::from(py) + 0.5) / f64::from(height);
        (
            self.min_x + u * (self.max_x - self.min_x),
            self.min_z + v * (self.max_z - self.min_z),
        )
    }

    /// Pixel containing world position `(x, z)`, if inside the image.
    fn pixel_at(&self, x: f64, z: f64, width: u32, height: u32) -> Option<(u32, u32)> {
        let u = (x - self.min_x) / (self.max_x - self.min_x);
        let v = (z - self.min_z) / (self.max_z - self.min_z);
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        Some((
            (u * f64::from(width)) as u32,
            (v * f64::from(height)) as u32,
        ))
    }
}

/// Map an elevation to an RGB colour.
///
/// Colour bands: deep water → shallow water → beach → lowland green →
/// rock brown → snow, with `peak` the elevation drawn fully white.
pub fn height_to_color(elevation: f64, sea_level: f64, peak: f64) -> [u8; 3] {
    let above = elevation - sea_level;
    let span = (peak - sea_level).max(1.0);

    if above < -40.0 {
        [0, 0, 128]
    } else if above < 0.0 {
        [30, 80, 200]
    } else if above < 3.0 {
        [220, 200, 130]
    } else {
        let n = (above / span).clamp(0.0, 1.0);
        if n < 0.35 {
            let t = n / 0.35;
            [
                (30.0 + t * 80.0) as u8,
                (160.0 - t * 40.0) as u8,
                (30.0 + t * 20.0) as u8,
            ]
        } else if n < 0.75 {
            let t = (n - 0.35) / 0.4;
            [
                (110.0 + t * 40.0) as u8,
                (120.0 - t * 50.0) as u8,
                (50.0 + t * 20.0) as u8,
            ]
        } else {
            let t = (n - 0.75) / 0.25;
            let base = (150.0 + t * 105.0) as u8;
            [base, base, base]
        }
    }
}

/// Render elevation over `region`, pre-cave surface.
pub fn render_height_map(
    generator: &TerrainGenerator,
    width: u32,
    height: u32,
    region: &MapRegion,
    peak: f64,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let sea_level = generator.sea_level();
    for py in 0..height {
        for px in 0..width {
            let (x, z) = region.world_at(px, py, width, height);
            let sample = generator.surface_at(x, z);
            let color = if sample.is_river {
                [60, 120, 220]
            } else {
                height_to_color(sample.elevation, sea_level, peak)
            };
            image.set_rgb(px, py, color);
        }
    }
    image
}

/// Render the categorical biome of every pixel using each biome's colour.
pub fn render_biome_map(
    generator: &TerrainGenerator,
    width: u32,
    height: u32,
    region: &MapRegion,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    for py in 0..height {
        for px in 0..width {
            let (x, z) = region.world_at(px, py, width, height);
            image.set_rgb(px, py, generator.biome_at(x, z).color);
        }
    }
    image
}

/// Mark each entrance centre with a small red cross.
pub fn overlay_entrances(image: &mut DebugImage, region: &MapRegion, entrances: &[CaveEntrance]) {
    let (width, height) = image.dimensions();
    for e in entrances {
        let Some((cx, cy)) = region.pixel_at(e.x, e.z, width, height) else {
            continue;
        };
        for d in -2i64..=2 {
            let px = i64::from(cx) + d;
            let py = i64::from(cy) + d;
            if (0..i64::from(width)).contains(&px) {
                image.set_rgb(px as u32, cy, [220, 30, 30]);
            }
            if (0..i64::from(height)).contains(&py) {
                image.set_rgb(cx, py as u32, [220, 30, 30]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_config::Config;

    fn generator() -> TerrainGenerator {
        let mut config = Config::default();
        config.world.seed = "alpha".into();
        TerrainGenerator::new(&config).unwrap()
    }

    #[test]
    fn test_height_colors_ordered_by_band() {
        assert_eq!(height_to_color(-100.0, 0.0, 500.0), [0, 0, 128]);
        assert_eq!(height_to_color(-5.0, 0.0, 500.0), [30, 80, 200]);
        assert_eq!(height_to_color(1.0, 0.0, 500.0), [220, 200, 130]);
        assert_eq!(height_to_color(10_000.0, 0.0, 500.0), [255, 255, 255]);
    }

    #[test]
    fn test_height_map_has_variation() {
        let region = MapRegion::centered(6000.0, 6000.0, 4000.0);
        let image = render_height_map(&generator(), 32, 32, &region, 900.0);
        assert_eq!(image.dimensions(), (32, 32));
        assert!(image.unique_color_count() > 4);
    }

    #[test]
    fn test_biome_map_shows_several_biomes() {
        let region = MapRegion::centered(0.0, 0.0, 20_000.0);
        let image = render_biome_map(&generator(), 48, 48, &region);
        assert!(
            image.unique_color_count() >= 3,
            "a 40 km square should span several biomes"
        );
    }

    #[test]
    fn test_overlay_marks_entrance_centre() {
        let region = MapRegion::centered(0.0, 0.0, 50.0);
        let mut image = DebugImage::new(20, 20);
        let e = CaveEntrance {
            x: 0.0,
            z: 0.0,
            radius: 5.0,
            carve_depth: 3.0,
        };
        overlay_entrances(&mut image, &region, &[e]);
        assert_eq!(image.get_pixel(10, 10), [220, 30, 30, 255]);
        // Entrances outside the region are ignored.
        overlay_entrances(
            &mut image,
            &region,
            &[CaveEntrance {
                x: 500.0,
                ..e
            }],
        );
    }
}
