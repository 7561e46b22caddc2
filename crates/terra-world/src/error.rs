//! Error type for chunk streaming.

use terra_config::ConfigError;
use terra_mesh::MeshError;

/// Errors raised while setting up or running a [`ChunkManager`](crate::ChunkManager).
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configuration was rejected, or does not match the generator.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A sampled grid did not fit the mesh layout.
    #[error("failed to mesh chunk: {0}")]
    Mesh(#[from] MeshError),
}
