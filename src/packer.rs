//! Placement search and the constructive packer.
//!
//! For a single box, `find_best_position` scans the grid's potential points
//! in scan order and returns the first `(origin, orientation)` pair that
//! fits, does not overlap anything already placed, and is sufficiently
//! supported. `constructive_pack` drives that search over an ordered list
//! of boxes, retrying once on anything left over from the first pass.

use crate::grid::Grid;
use crate::model::{Box3D, Placement};
use crate::types::{EPSILON_GENERAL, IVec3};

/// Minimum fraction of a box's base footprint that must be supported
/// unless the box rests on the container floor.
const MIN_SUPPORT_RATIO: f64 = 0.95;

/// Finds the first `(origin, orientation)` satisfying fit, non-overlap, and
/// support, trying potential points in scan order and, for each point, the
/// box's orientations from smallest to largest base area.
pub fn find_best_position(grid: &Grid, b: &Box3D) -> Option<(IVec3, IVec3)> {
    let orientations = b.allowed_orientations();
    for (x, y, z) in grid.potential_points() {
        let origin = IVec3::new(x, y, z);
        for orientation in &orientations {
            if !grid.is_region_free(origin, *orientation) {
                continue;
            }
            let support = grid.support_fraction(origin, *orientation);
            if support + EPSILON_GENERAL >= MIN_SUPPORT_RATIO {
                return Some((origin, *orientation));
            }
        }
    }
    None
}

/// Packs `ordered` boxes into a fresh grid, retrying any box left over from
/// the first pass exactly once, in the boxes' original order.
pub fn constructive_pack(ordered: &[Box3D], grid: &mut Grid) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(ordered.len());
    let mut pending: Vec<&Box3D> = Vec::new();

    for b in ordered {
        match find_best_position(grid, b) {
            Some((origin, orientation)) => {
                grid.place(origin, orientation);
                placements.push(Placement {
                    box_id: b.id.clone(),
                    origin: origin.as_tuple(),
                    orientation: orientation.as_tuple(),
                    weight: b.weight,
                });
            }
            None => pending.push(b),
        }
    }

    let retry = std::mem::take(&mut pending);
    for b in retry {
        if let Some((origin, orientation)) = find_best_position(grid, b) {
            grid.place(origin, orientation);
            placements.push(Placement {
                box_id: b.id.clone(),
                origin: origin.as_tuple(),
                orientation: orientation.as_tuple(),
                weight: b.weight,
            });
        }
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IVec3;

    fn cube(id: &str, side: i64, weight: f64) -> Box3D {
        Box3D::new(id, "cust-1", 0, false, (side, side, side), weight).unwrap()
    }

    #[test]
    fn first_box_lands_at_origin() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        let b = cube("A", 2, 1.0);
        let (origin, orientation) = find_best_position(&grid, &b).unwrap();
        assert_eq!(origin, IVec3::zero());
        assert_eq!(orientation.volume(), 8);
        grid.place(origin, orientation);
        assert!(!grid.is_region_free(IVec3::zero(), IVec3::new(1, 1, 1)));
    }

    #[test]
    fn box_larger_than_container_is_never_placed() {
        let grid = Grid::new(IVec3::new(3, 3, 3));
        let b = cube("A", 4, 1.0);
        assert!(find_best_position(&grid, &b).is_none());
    }

    #[test]
    fn stack_of_two_boxes_on_supported_base() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        let base = cube("base", 4, 1.0);
        let (origin, orientation) = find_best_position(&grid, &base).unwrap();
        grid.place(origin, orientation);

        let top = cube("top", 4, 1.0);
        let (top_origin, _) = find_best_position(&grid, &top).unwrap();
        assert_eq!(top_origin.z, 4);
    }

    #[test]
    fn every_returned_position_satisfies_the_support_predicate() {
        // A 2x2 base leaves only a narrow overhang candidate above it; any
        // position find_best_position returns for a wider box must still
        // satisfy the 95% support rule, never an overhang.
        let mut grid = Grid::new(IVec3::new(2, 2, 10));
        let base = cube("base", 2, 1.0);
        let (origin, orientation) = find_best_position(&grid, &base).unwrap();
        grid.place(origin, orientation);

        let wide = Box3D::new("wide", "cust-1", 0, false, (2, 2, 1), 1.0).unwrap();
        if let Some((o, ext)) = find_best_position(&grid, &wide) {
            let support = grid.support_fraction(o, ext);
            assert!(o.z == 0 || support + EPSILON_GENERAL >= MIN_SUPPORT_RATIO);
        }
    }

    #[test]
    fn overhanging_box_is_rejected_for_insufficient_support() {
        // Place a 2x2x2 base inside a wider container so sideways floor
        // space is still available, then confirm a 4x4 box cannot land
        // directly on top of the base (only 25% support) — it must either
        // be placed elsewhere on the floor or left unplaced, never at the
        // base's top height with an overhanging footprint.
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        let base = cube("base", 2, 1.0);
        grid.place(IVec3::zero(), IVec3::new(2, 2, 2));

        let big = cube("big", 4, 1.0);
        let result = find_best_position(&grid, &big);
        if let Some((o, ext)) = result {
            let support = grid.support_fraction(o, ext);
            assert!(o.z == 0 || support + EPSILON_GENERAL >= MIN_SUPPORT_RATIO);
        }
        let _ = base;
    }

    #[test]
    fn constructive_pack_retries_deferred_box_once() {
        let mut grid = Grid::new(IVec3::new(4, 4, 4));
        let boxes = vec![cube("A", 3, 1.0), cube("B", 3, 1.0)];
        let placements = constructive_pack(&boxes, &mut grid);
        // the container only has room for one 3x3x3 box given its 4x4x4 extent
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].box_id, "A");
    }

    #[test]
    fn constructive_pack_places_all_boxes_that_fit() {
        let mut grid = Grid::new(IVec3::new(10, 10, 10));
        let boxes = vec![cube("A", 2, 1.0), cube("B", 2, 1.0), cube("C", 2, 1.0)];
        let placements = constructive_pack(&boxes, &mut grid);
        assert_eq!(placements.len(), 3);
        let mut ids: Vec<&str> = placements.iter().map(|p| p.box_id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
