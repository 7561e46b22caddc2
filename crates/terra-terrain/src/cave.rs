//! Cave worms: deterministic tunnel centerlines traced beneath the surface,
//! and the entrance bowls they leave where they break through.
//!
//! Worm origins are seeded per chunk, so the tunnels any client sees depend
//! only on the world seed and the chunk coordinates, never on load order.

mod carver;
mod entrance;
mod worm;

pub use carver::CaveCarver;
pub use entrance::{CaveEntrance, carve_depth_at, merge_entrances};
pub use worm::{WormOrigin, WormPath, WormSegment};
