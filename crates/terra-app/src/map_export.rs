//! PNG export of the debug biome and height maps.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use terra_terrain::debug_viz::{
    DebugImage, MapRegion, overlay_entrances, render_biome_map, render_height_map,
};
use terra_terrain::{CaveEntrance, TerrainGenerator};
use tracing::info;

/// Elevation drawn fully white in height maps.
const HEIGHT_MAP_PEAK: f64 = 900.0;

/// Errors raised while writing a debug map.
#[derive(Debug, thiserror::Error)]
pub enum MapExportError {
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode an image as an 8-bit RGBA PNG.
pub fn encode_png(image: &DebugImage) -> Result<Vec<u8>, MapExportError> {
    let mut png_buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(Cursor::new(&mut png_buf), image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.pixels)?;
        writer.finish()?;
    }
    Ok(png_buf)
}

/// Encode `image` and write it to `path`, creating parent directories.
pub fn write_png(path: &Path, image: &DebugImage) -> Result<(), MapExportError> {
    let bytes = encode_png(image)?;
    let write_err = |source| MapExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, bytes).map_err(write_err)
}

/// Path of the height map written next to the biome map at `path`.
fn height_map_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    path.with_file_name(format!("{stem}_height.png"))
}

/// Render the biome map to `path` and the height map beside it, both over
/// `region` with `entrances` marked. Returns the paths written.
pub fn export_maps(
    generator: &TerrainGenerator,
    path: &Path,
    size: u32,
    region: &MapRegion,
    entrances: &[CaveEntrance],
) -> Result<[PathBuf; 2], MapExportError> {
    let mut biome = render_biome_map(generator, size, size, region);
    overlay_entrances(&mut biome, region, entrances);
    write_png(path, &biome)?;

    let height_path = height_map_path(path);
    let mut height = render_height_map(generator, size, size, region, HEIGHT_MAP_PEAK);
    overlay_entrances(&mut height, region, entrances);
    write_png(&height_path, &height)?;

    info!(
        biome = %path.display(),
        height = %height_path.display(),
        size,
        "exported debug maps"
    );
    Ok([path.to_path_buf(), height_path])
}
