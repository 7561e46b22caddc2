//! Top-level error of the `terra` binary.

use terra_config::ConfigError;
use terra_world::WorldError;

use crate::map_export::MapExportError;
use crate::platform::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    MapExport(#[from] MapExportError),
}
