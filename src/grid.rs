//! Voxel occupancy grid and potential-point bookkeeping.
//!
//! The container is modeled as a dense `(X, Y, Z)` voxel field, bit-packed
//! into `u64` words. Alongside occupancy, the grid tracks the set of
//! "potential points" — candidate origins for the next placement, seeded
//! with the container's own corner and extended with the top/right/front
//! corners of every box placed so far, following the constructive corner
//! point heuristic the search in `packer` is built on.

use std::collections::BTreeSet;

use crate::types::IVec3;

/// A candidate origin for the next placement, ordered for deterministic
/// iteration: by Z layer first, then by `X + Y` (closest to the back-left
/// corner), then by X, then by Y.
pub type Point = (i64, i64, i64);

fn point_sort_key(p: &Point) -> (i64, i64, i64, i64) {
    (p.2, p.0 + p.1, p.0, p.1)
}

/// Bit-packed boolean occupancy field over a container's voxel extents.
pub struct Grid {
    dims: IVec3,
    words: Vec<u64>,
    potential_points: BTreeSet<Point>,
}

impl Grid {
    pub fn new(dims: IVec3) -> Self {
        let cell_count = (dims.x * dims.y * dims.z).max(0) as usize;
        let word_count = cell_count.div_ceil(64);
        let mut potential_points = BTreeSet::new();
        potential_points.insert((0, 0, 0));
        Self {
            dims,
            words: vec![0u64; word_count],
            potential_points,
        }
    }

    #[inline]
    pub fn dims(&self) -> IVec3 {
        self.dims
    }

    #[inline]
    fn index(&self, x: i64, y: i64, z: i64) -> usize {
        ((z * self.dims.y + y) * self.dims.x + x) as usize
    }

    #[inline]
    pub fn is_occupied(&self, x: i64, y: i64, z: i64) -> bool {
        if x < 0 || y < 0 || z < 0 || x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return true;
        }
        let idx = self.index(x, y, z);
        (self.words[idx / 64] >> (idx % 64)) & 1 == 1
    }

    fn set_occupied(&mut self, x: i64, y: i64, z: i64) {
        let idx = self.index(x, y, z);
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    /// True if every voxel in `[origin, origin+extent)` is free and within bounds.
    pub fn is_region_free(&self, origin: IVec3, extent: IVec3) -> bool {
        if !extent.fits_within(&origin, &self.dims) {
            return false;
        }
        for z in origin.z..origin.z + extent.z {
            for y in origin.y..origin.y + extent.y {
                for x in origin.x..origin.x + extent.x {
                    if self.is_occupied(x, y, z) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Fraction of the region's base footprint (the `z == origin.z` layer)
    /// that rests on either the container floor or an occupied voxel directly
    /// beneath it, in `[0.0, 1.0]`.
    pub fn support_fraction(&self, origin: IVec3, extent: IVec3) -> f64 {
        if origin.z == 0 {
            return 1.0;
        }
        let footprint = (extent.x * extent.y).max(1);
        let mut supported = 0i64;
        for y in origin.y..origin.y + extent.y {
            for x in origin.x..origin.x + extent.x {
                if self.is_occupied(x, y, origin.z - 1) {
                    supported += 1;
                }
            }
        }
        supported as f64 / footprint as f64
    }

    /// Marks the region as occupied and updates the potential-point set:
    /// the placement's own origin is consumed, and its top/right/front
    /// corners are offered as new candidates (if still inside the container).
    pub fn place(&mut self, origin: IVec3, extent: IVec3) {
        for z in origin.z..origin.z + extent.z {
            for y in origin.y..origin.y + extent.y {
                for x in origin.x..origin.x + extent.x {
                    self.set_occupied(x, y, z);
                }
            }
        }

        self.potential_points.remove(&origin.as_tuple());

        let candidates = [
            (origin.x + extent.x, origin.y, origin.z),
            (origin.x, origin.y + extent.y, origin.z),
            (origin.x, origin.y, origin.z + extent.z),
        ];
        for (x, y, z) in candidates {
            if x < self.dims.x && y < self.dims.y && z < self.dims.z {
                self.potential_points.insert((x, y, z));
            }
        }
    }

    /// Snapshot of the current potential points, sorted in scan order.
    pub fn potential_points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.potential_points.iter().copied().collect();
        points.sort_by_key(point_sort_key);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_starts_with_origin_as_only_potential_point() {
        let grid = Grid::new(IVec3::new(10, 10, 10));
        assert_eq!(grid.potential_points(), vec![(0, 0, 0)]);
    }

    #[test]
    fn placing_marks_region_occupied_and_rejects_overlap() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        let extent = IVec3::new(3, 3, 3);
        assert!(grid.is_region_free(IVec3::zero(), extent));
        grid.place(IVec3::zero(), extent);
        assert!(!grid.is_region_free(IVec3::zero(), extent));
        assert!(!grid.is_region_free(IVec3::new(1, 1, 1), IVec3::new(1, 1, 1)));
        assert!(grid.is_region_free(IVec3::new(3, 0, 0), IVec3::new(1, 1, 1)));
    }

    #[test]
    fn placing_adds_top_right_front_corners_as_potential_points() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        grid.place(IVec3::zero(), IVec3::new(2, 3, 4));
        let points = grid.potential_points();
        assert!(points.contains(&(2, 0, 0)));
        assert!(points.contains(&(0, 3, 0)));
        assert!(points.contains(&(0, 0, 4)));
        assert!(!points.contains(&(0, 0, 0)));
    }

    #[test]
    fn support_fraction_is_full_on_floor() {
        let grid = Grid::new(IVec3::new(10, 10, 10));
        let frac = grid.support_fraction(IVec3::zero(), IVec3::new(2, 2, 2));
        assert_eq!(frac, 1.0);
    }

    #[test]
    fn support_fraction_reflects_partial_overlap_below() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        // base block covers x in [0,2), y in [0,4)
        grid.place(IVec3::zero(), IVec3::new(2, 4, 1));
        // placed block sits above at z=1, spanning x in [0,4), y in [0,4):
        // only half its footprint (x in [0,2)) is supported.
        let frac = grid.support_fraction(IVec3::new(0, 0, 1), IVec3::new(4, 4, 1));
        assert!((frac - 0.5).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_region_is_never_free() {
        let grid = Grid::new(IVec3::new(4, 4, 4));
        assert!(!grid.is_region_free(IVec3::new(3, 3, 3), IVec3::new(2, 2, 2)));
    }
}
