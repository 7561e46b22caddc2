//! Memoised cave entrance lookups for streaming.
//!
//! Every owner chunk scans the worm origins of a wide window around it, and
//! neighbouring owners share most of that window. Caching the per-origin
//! candidates and per-owner merged sets makes each worm trace happen once
//! per session instead of once per neighbouring chunk.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use terra_terrain::{CaveEntrance, ChunkCoord, TerrainGenerator};

/// Entrance candidates and owned sets keyed by chunk.
#[derive(Debug, Default)]
pub struct EntranceCache {
    candidates: FxHashMap<ChunkCoord, Arc<[CaveEntrance]>>,
    owned: FxHashMap<ChunkCoord, Arc<[CaveEntrance]>>,
}

impl EntranceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entrances reaching into `coord` grown by `margin`.
    ///
    /// Identical to what the generator computes from scratch for the same
    /// rectangle; only the amount of tracing differs.
    pub fn entrances_near(
        &mut self,
        generator: &TerrainGenerator,
        coord: ChunkCoord,
        margin: f64,
    ) -> Vec<CaveEntrance> {
        for dz in -1..=1 {
            for dx in -1..=1 {
                self.ensure_owned(generator, coord.offset(dx, dz));
            }
        }
        let owned = &self.owned;
        generator
            .caves()
            .entrances_near_chunk_with(coord, margin, |owner| cached_slice(owned, owner))
    }

    fn ensure_owned(&mut self, generator: &TerrainGenerator, owner: ChunkCoord) {
        if self.owned.contains_key(&owner) {
            return;
        }
        let r = generator.caves().check_radius();
        for dz in -r..=r {
            for dx in -r..=r {
                let origin = owner.offset(dx, dz);
                self.candidates
                    .entry(origin)
                    .or_insert_with(|| generator.entrance_candidates_from(origin).into());
            }
        }
        let candidates = &self.candidates;
        let owned: Arc<[CaveEntrance]> = generator
            .caves()
            .owned_entrances(owner, |origin| cached_slice(candidates, origin))
            .into();
        self.owned.insert(owner, owned);
    }

    /// Forget every entry farther than `keep` chunks (Chebyshev) from `center`.
    pub fn retain_near(&mut self, center: ChunkCoord, keep: i64) {
        self.candidates.retain(|c, _| c.chebyshev(center) <= keep);
        self.owned.retain(|c, _| c.chebyshev(center) <= keep);
    }

    /// Number of origin chunks whose worms have been traced.
    pub fn traced_origins(&self) -> usize {
        self.candidates.len()
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.owned.clear();
    }
}

fn cached_slice(
    map: &FxHashMap<ChunkCoord, Arc<[CaveEntrance]>>,
    coord: ChunkCoord,
) -> &[CaveEntrance] {
    map.get(&coord).map(|entries| entries.as_ref()).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_config::Config;

    fn generator() -> TerrainGenerator {
        let mut config = Config::default();
        config.world.seed = "alpha".into();
        config.world.chunk_size = 256.0;
        config.caves.spawn_chance = 1.0;
        config.caves.max_worms_per_chunk = 2;
        config.caves.segments = 40;
        TerrainGenerator::new(&config).unwrap()
    }

    #[test]
    fn test_cache_matches_direct_computation() {
        let generator = generator();
        let mut cache = EntranceCache::new();
        for coord in [ChunkCoord::new(6, 2), ChunkCoord::new(7, 2), ChunkCoord::new(-9, 4)] {
            assert_eq!(
                cache.entrances_near(&generator, coord, 0.0),
                generator.entrances_near_chunk(coord),
                "cached entrances differ at {coord:?}"
            );
        }
    }

    #[test]
    fn test_margin_only_adds_bowls() {
        let generator = generator();
        let mut cache = EntranceCache::new();
        let coord = ChunkCoord::new(5, -5);
        let strict = cache.entrances_near(&generator, coord, 0.0);
        let wide = cache.entrances_near(&generator, coord, 8.0);
        assert!(strict.iter().all(|e| wide.contains(e)));
    }

    #[test]
    fn test_retain_prunes_far_entries() {
        let generator = generator();
        let mut cache = EntranceCache::new();
        cache.entrances_near(&generator, ChunkCoord::new(10, 10), 0.0);
        assert!(cache.traced_origins() > 0);
        cache.retain_near(ChunkCoord::new(-50, -50), 3);
        assert_eq!(cache.traced_origins(), 0);
    }
}
