//! Nearest-first load queue and the render-range scan that fills it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use terra_terrain::ChunkCoord;

/// Priority queue of chunks awaiting generation, nearest first.
///
/// Ties in distance are broken by coordinate so the order is deterministic.
#[derive(Debug, Default)]
pub struct ChunkLoadQueue {
    /// Min-heap: `(distance_squared, coord)`.
    queue: BinaryHeap<Reverse<(i64, ChunkCoord)>>,
    /// Coordinates already in the queue (dedup guard).
    pending: FxHashSet<ChunkCoord>,
}

impl ChunkLoadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `coord` with its squared distance to the observer.
    ///
    /// Duplicates are ignored.
    pub fn enqueue(&mut self, coord: ChunkCoord, dist_sq: i64) {
        if self.pending.insert(coord) {
            self.queue.push(Reverse((dist_sq, coord)));
        }
    }

    /// Dequeue the nearest chunk.
    pub fn dequeue(&mut self) -> Option<(i64, ChunkCoord)> {
        let Reverse((dist_sq, coord)) = self.queue.pop()?;
        self.pending.remove(&coord);
        Some((dist_sq, coord))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }

    /// Drain everything, nearest first.
    pub fn drain_nearest(&mut self) -> Vec<ChunkCoord> {
        let mut ordered = Vec::with_capacity(self.len());
        while let Some((_, coord)) = self.dequeue() {
            ordered.push(coord);
        }
        ordered
    }
}

/// Every chunk whose Euclidean distance from `center` is at most `radius`
/// chunks, with its squared distance.
pub fn chunks_within(
    center: ChunkCoord,
    radius: u32,
) -> impl Iterator<Item = (ChunkCoord, i64)> {
    let r = radius as i32;
    let r_sq = i64::from(radius) * i64::from(radius);
    (-r..=r).flat_map(move |dz| {
        (-r..=r).filter_map(move |dx| {
            let coord = center.offset(dx, dz);
            let dist_sq = coord.distance_sq(center);
            (dist_sq <= r_sq).then_some((coord, dist_sq))
        })
    })
}
