//! Deterministic seeded generation utilities.
//!
//! Every stochastic decision in the generator goes through this module: world
//! seed parsing, per-purpose seed derivation, coordinate hashing, and the one
//! RNG constructor. Substituting the RNG algorithm happens in
//! [`seeded_rng`] and nowhere else, so determinism cannot silently diverge
//! between subsystems.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Salts
// ---------------------------------------------------------------------------

/// Per-purpose salts mixed into the world seed.
///
/// Changing any of these changes every world generated with this crate.
pub mod salt {
    /// Temperature climate field.
    pub const TEMPERATURE: u64 = 0x7E3A_0001;
    /// Humidity climate field.
    pub const HUMIDITY: u64 = 0x7E3A_0002;
    /// Continentalness climate field.
    pub const CONTINENTALNESS: u64 = 0x7E3A_0003;
    /// Erosion climate field.
    pub const EROSION: u64 = 0x7E3A_0004;
    /// Weirdness climate field.
    pub const WEIRDNESS: u64 = 0x7E3A_0005;
    /// Base elevation fBm.
    pub const BASE_HEIGHT: u64 = 0x4E16_0001;
    /// Ridged mountain noise.
    pub const MOUNTAIN: u64 = 0x4E16_0002;
    /// River channel noise.
    pub const RIVER: u64 = 0x4E16_0003;
    /// Worm origin selection.
    pub const CAVE_ORIGIN: u64 = 0xCA5E_0001;
    /// Worm steering and radius noise.
    pub const CAVE_NOISE: u64 = 0xCA5E_0002;
    /// Entity spawn picks.
    pub const SPAWN: u64 = 0x5A3D_0001;
}

// ---------------------------------------------------------------------------
// World seed
// ---------------------------------------------------------------------------

/// The numeric identity of a world.
///
/// Text seeds that parse as a decimal integer are used numerically, anything
/// else is hashed with FNV-1a, so `"12345"` and `12345` name the same world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Parse a seed from user-supplied text.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Self(value);
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self(value as u64);
        }
        Self(fnv1a_64(trimmed.as_bytes()))
    }

    /// The raw 64-bit seed.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Derive the seed for one subsystem.
    pub fn derive(self, salt: u64) -> u64 {
        derive_seed(self.0, salt)
    }

    /// Derive a 32-bit seed suitable for `noise` generators.
    pub fn noise_seed(self, salt: u64) -> u32 {
        fold_u32(self.derive(salt))
    }
}

impl From<u64> for WorldSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// 64-bit FNV-1a over a byte string. Stable across platforms and releases.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

/// SplitMix64 finaliser: a bijective avalanche mix of 64 bits.
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Combine a seed with a salt into a new well-distributed seed.
#[inline]
pub fn derive_seed(seed: u64, salt: u64) -> u64 {
    mix64(seed ^ mix64(salt.wrapping_add(0x9e37_79b9_7f4a_7c15)))
}

/// Hash an integer coordinate pair under a seed.
///
/// The result depends only on `(seed, x, z)`, never on call order, so two
/// clients generating the same chunk agree without coordination.
#[inline]
pub fn hash_coords(seed: u64, x: i32, z: i32) -> u64 {
    let hx = derive_seed(seed, i64::from(x) as u64);
    derive_seed(hx, (i64::from(z) as u64) ^ 0x632b_e59b_d9b4_e019)
}

fn fold_u32(value: u64) -> u32 {
    ((value >> 32) ^ (value & 0xffff_ffff)) as u32
}

/// The single constructor for every RNG used during generation.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Deterministic sqrt using libm.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}
