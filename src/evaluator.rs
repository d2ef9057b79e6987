//! Feasibility scoring for one packed solution.
//!
//! Two checks run in order: zone-weight feasibility (did any compartment's
//! weight budget go negative?) and center-of-gravity feasibility (does the
//! weighted mean of placement origins land within a safe band of the
//! container's footprint center?).

use crate::model::{Container, Placement, Score};

/// Scores `placements` against `container`, using `total_weight` (the sum
/// of *all* original box weights, including any left unplaced) as the
/// denominator for the center-of-gravity mean — matching the source this
/// crate is grounded on (see the design notes on scoring irregularities).
pub fn evaluate(placements: &[Placement], container: &Container, total_weight: f64) -> Score {
    let mut zone_budgets: Vec<f64> = container.zones.iter().map(|z| z.budget).collect();

    for placement in placements {
        let origin = placement.origin_vec();
        if let Some(zone_idx) = container.zone_for_x(origin.x) {
            zone_budgets[zone_idx] -= placement.weight;
            if zone_budgets[zone_idx] < 0.0 {
                return Score::Infeasible;
            }
        }
    }

    let mut com_x = 0.0;
    let mut com_y = 0.0;
    for placement in placements {
        let origin = placement.origin_vec();
        com_x += placement.weight * origin.x as f64;
        com_y += placement.weight * origin.y as f64;
    }
    com_x /= total_weight;
    com_y /= total_weight;

    let (x, y, _) = container.dims;
    let safe_x = x as f64 * 0.4;
    let safe_y = y as f64 * 0.4;

    let stable = com_x >= safe_x
        && com_x <= x as f64 - safe_x
        && com_y >= safe_y
        && com_y <= y as f64 - safe_y;

    if !stable {
        return Score::Value(0.0);
    }

    Score::Value(placements.len() as f64)
}

/// Weighted mean of placement origins on X and Y, divided by `total_weight`
/// — the same quantity `evaluate` uses for its center-of-gravity check,
/// exposed separately so the RCH driver can compute distance-from-center
/// for solution ranking without re-deriving it.
pub fn center_of_gravity_xy(placements: &[Placement], total_weight: f64) -> (f64, f64) {
    if total_weight <= 0.0 {
        return (0.0, 0.0);
    }
    let mut com_x = 0.0;
    let mut com_y = 0.0;
    for placement in placements {
        let origin = placement.origin_vec();
        com_x += placement.weight * origin.x as f64;
        com_y += placement.weight * origin.y as f64;
    }
    (com_x / total_weight, com_y / total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeightZone;

    fn placement(id: &str, x: i64, weight: f64) -> Placement {
        Placement {
            box_id: id.to_string(),
            origin: (x, 0, 0),
            orientation: (2, 2, 2),
            weight,
        }
    }

    #[test]
    fn zone_overflow_is_infeasible() {
        let zones = vec![WeightZone::new(0, 10, 5.0).unwrap()];
        let container = Container::new((10, 10, 10), 5.0, zones).unwrap();
        let placements = vec![placement("a", 1, 3.0), placement("b", 2, 3.0)];
        let score = evaluate(&placements, &container, 6.0);
        assert_eq!(score, Score::Infeasible);
    }

    #[test]
    fn centered_solution_is_scored_by_placement_count() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let placements = vec![placement("a", 5, 1.0), placement("b", 5, 1.0)];
        let score = evaluate(&placements, &container, 2.0);
        assert_eq!(score, Score::Value(2.0));
    }

    #[test]
    fn off_center_solution_scores_zero() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let placements = vec![placement("a", 0, 1.0)];
        let score = evaluate(&placements, &container, 1.0);
        assert_eq!(score, Score::Value(0.0));
    }

    #[test]
    fn empty_solution_has_zero_placed_count() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let score = evaluate(&[], &container, 0.0);
        assert_eq!(score, Score::Value(0.0));
    }
}
