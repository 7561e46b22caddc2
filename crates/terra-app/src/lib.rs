//! Headless driver for the Terra world generator: directory resolution, the
//! streaming cadence, mesh residency bookkeeping, and debug map export.

pub mod cadence;
pub mod error;
pub mod map_export;
pub mod platform;
pub mod residency;

pub use cadence::{MAX_FRAME_TIME, STREAM_RATE_HZ, UpdateCadence};
pub use error::AppError;
pub use map_export::{MapExportError, encode_png, export_maps, write_png};
pub use platform::{PlatformDirs, PlatformError};
pub use residency::{MeshResidency, ResidencyCounters};
