//! Cave entrance bowls and their merge rule.

/// A circular depression where a worm reaches the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaveEntrance {
    pub x: f64,
    pub z: f64,
    /// Horizontal radius of the bowl.
    pub radius: f64,
    /// Depth carved at the bowl centre.
    pub carve_depth: f64,
}

impl CaveEntrance {
    pub fn distance_sq_to(&self, x: f64, z: f64) -> f64 {
        let dx = self.x - x;
        let dz = self.z - z;
        dx * dx + dz * dz
    }

    /// Whether two bowls lie within either one's radius of each other.
    pub fn overlaps(&self, other: &Self) -> bool {
        let reach = self.radius.max(other.radius);
        self.distance_sq_to(other.x, other.z) < reach * reach
    }

    /// Combine two overlapping bowls: larger radius, averaged centre, deepest carve.
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            z: (self.z + other.z) * 0.5,
            radius: self.radius.max(other.radius),
            carve_depth: self.carve_depth.max(other.carve_depth),
        }
    }

    /// Depth this bowl carves at `(x, z)`: `depth * (1 - (r / R)^2)` inside, 0 outside.
    pub fn carve_at(&self, x: f64, z: f64) -> f64 {
        let r2 = self.radius * self.radius;
        let d2 = self.distance_sq_to(x, z);
        if d2 >= r2 || r2 <= 0.0 {
            return 0.0;
        }
        self.carve_depth * (1.0 - d2 / r2)
    }

    /// Whether the bowl touches the axis-aligned rectangle `[min, max]`.
    pub fn touches_rect(&self, min_x: f64, min_z: f64, max_x: f64, max_z: f64) -> bool {
        let nx = self.x.clamp(min_x, max_x);
        let nz = self.z.clamp(min_z, max_z);
        self.distance_sq_to(nx, nz) < self.radius * self.radius
    }
}

/// Merge candidates until no two results overlap.
///
/// Each candidate absorbs every already-merged bowl it overlaps, repeating as
/// it grows, before joining the result. The output depends only on the input
/// order.
pub fn merge_entrances(candidates: impl IntoIterator<Item = CaveEntrance>) -> Vec<CaveEntrance> {
    let mut merged: Vec<CaveEntrance> = Vec::new();
    for candidate in candidates {
        let mut current = candidate;
        while let Some(i) = merged.iter().position(|m| m.overlaps(&current)) {
            let absorbed = merged.remove(i);
            current = absorbed.merged_with(&current);
        }
        merged.push(current);
    }
    merged
}

/// Deepest carve of any bowl at `(x, z)`. Overlapping bowls do not stack.
pub fn carve_depth_at(entrances: &[CaveEntrance], x: f64, z: f64) -> f64 {
    entrances
        .iter()
        .map(|e| e.carve_at(x, z))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl(x: f64, z: f64, radius: f64, carve_depth: f64) -> CaveEntrance {
        CaveEntrance {
            x,
            z,
            radius,
            carve_depth,
        }
    }

    #[test]
    fn test_carve_profile() {
        let e = bowl(0.0, 0.0, 10.0, 8.0);
        assert_eq!(e.carve_at(0.0, 0.0), 8.0);
        assert!((e.carve_at(5.0, 0.0) - 6.0).abs() < 1e-12);
        assert_eq!(e.carve_at(10.0, 0.0), 0.0);
        assert_eq!(e.carve_at(0.0, 25.0), 0.0);
    }

    #[test]
    fn test_overlapping_bowls_use_deepest() {
        let bowls = [bowl(0.0, 0.0, 10.0, 8.0), bowl(4.0, 0.0, 10.0, 3.0)];
        let at = carve_depth_at(&bowls, 2.0, 0.0);
        assert!((at - bowls[0].carve_at(2.0, 0.0)).abs() < 1e-12);
        assert_eq!(carve_depth_at(&[], 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_merge_rule() {
        let merged = merge_entrances([bowl(0.0, 0.0, 6.0, 4.0), bowl(4.0, 2.0, 9.0, 3.0)]);
        assert_eq!(merged.len(), 1);
        let m = merged[0];
        assert_eq!((m.x, m.z), (2.0, 1.0));
        assert_eq!(m.radius, 9.0);
        assert_eq!(m.carve_depth, 4.0);
    }

    #[test]
    fn test_disjoint_bowls_kept() {
        let merged = merge_entrances([bowl(0.0, 0.0, 5.0, 1.0), bowl(50.0, 0.0, 5.0, 1.0)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_chain_reaches_fixpoint() {
        // A chain of bowls each touching the next shrinks to disjoint bowls.
        let chain: Vec<_> = (0..10).map(|i| bowl(f64::from(i) * 4.0, 0.0, 5.0, 1.0)).collect();
        let merged = merge_entrances(chain.iter().copied());
        assert!(merged.len() < chain.len());
        for (i, a) in merged.iter().enumerate() {
            for b in &merged[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} still overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_merge_monotonic() {
        let input = [
            bowl(0.0, 0.0, 4.0, 2.0),
            bowl(3.0, 0.0, 6.0, 5.0),
            bowl(30.0, 30.0, 3.0, 1.0),
            bowl(1.0, 1.0, 2.0, 7.0),
        ];
        let merged = merge_entrances(input);
        assert!(merged.len() <= input.len());
        let max_r = input.iter().map(|e| e.radius).fold(0.0, f64::max);
        let max_d = input.iter().map(|e| e.carve_depth).fold(0.0, f64::max);
        for m in &merged {
            assert!(m.radius <= max_r);
            assert!(m.carve_depth <= max_d);
        }
        // Every input is covered by a merged bowl at least as wide and deep.
        for e in &input {
            assert!(merged.iter().any(|m| m.radius >= e.radius && m.carve_depth >= e.carve_depth));
        }
    }

    #[test]
    fn test_touches_rect() {
        let e = bowl(-3.0, 10.0, 5.0, 1.0);
        assert!(e.touches_rect(0.0, 0.0, 64.0, 64.0));
        assert!(!bowl(-6.0, 10.0, 5.0, 1.0).touches_rect(0.0, 0.0, 64.0, 64.0));
    }
}
