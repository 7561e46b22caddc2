//! Heightfield meshing: terrain and water geometry for streamed chunks.
//!
//! Meshes are built in chunk-local coordinates from grids sampled on the
//! global lattice, so the edge vertices of neighbouring chunks coincide.

pub mod grid;
pub mod shading;
pub mod terrain_mesh;
pub mod vertex;
pub mod water_mesh;

pub use grid::{GridLayout, MeshError};
pub use shading::{SAND_COLOR, SNOW_COLOR, WATER_COLOR, shade_color};
pub use terrain_mesh::{TerrainMesh, build_terrain_mesh};
pub use vertex::TerrainVertex;
pub use water_mesh::{WaterMesh, build_water_mesh};
