//! Terrain debug visualization: top-down 2D maps of generation output.
//!
//! Provides [`DebugImage`] and renderers for elevation, biome and cave
//! entrance maps. The driver writes them to disk to diagnose seams, biome
//! layout and entrance placement without a renderer.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    MapRegion, height_to_color, overlay_entrances, render_biome_map, render_height_map,
};
