//! Reasons a box failed to make it into the final solution.
//!
//! The engine never panics on an unplaceable box — it is simply left out of
//! the solution. This module reconstructs *why*, for callers (the HTTP
//! surface, in particular) that want to report more than a silent omission.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Box3D, Container, Solution};

/// Why a box did not appear in the returned solution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum UnplacedReason {
    /// No orientation of the box fits within the container's extents at all.
    DimensionsExceedContainer,
    /// The box alone exceeds the container's total weight budget.
    TooHeavyForContainer,
    /// The box could, in principle, fit, but no free/supported position was
    /// found during the winning iteration's constructive pass.
    NoStablePosition,
}

/// One box that was left out of the solution, with the reason why.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UnplacedBox {
    pub box_id: String,
    pub reason: UnplacedReason,
}

fn dimensions_fit(b: &Box3D, container: &Container) -> bool {
    let bounds = container.dims_vec();
    b.allowed_orientations()
        .iter()
        .any(|o| o.x <= bounds.x && o.y <= bounds.y && o.z <= bounds.z)
}

/// Computes the unplaced-box diagnostics for a finished `solution`, given
/// the full original box list it was built from.
pub fn diagnose_unplaced(boxes: &[Box3D], container: &Container, solution: &Solution) -> Vec<UnplacedBox> {
    let placed: std::collections::HashSet<&str> = solution.placed_ids().collect();
    boxes
        .iter()
        .filter(|b| !placed.contains(b.id.as_str()))
        .map(|b| {
            let reason = if !dimensions_fit(b, container) {
                UnplacedReason::DimensionsExceedContainer
            } else if b.weight > container.max_weight {
                UnplacedReason::TooHeavyForContainer
            } else {
                UnplacedReason::NoStablePosition
            };
            UnplacedBox {
                box_id: b.id.clone(),
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Placement;

    #[test]
    fn oversized_box_is_flagged_dimensions_exceed_container() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let boxes = vec![Box3D::new("A", "c", 0, false, (11, 1, 1), 1.0).unwrap()];
        let solution = Solution::empty();
        let diag = diagnose_unplaced(&boxes, &container, &solution);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag[0].reason, UnplacedReason::DimensionsExceedContainer);
    }

    #[test]
    fn overweight_box_is_flagged_too_heavy() {
        let container = Container::single_zone((10, 10, 10), 5.0).unwrap();
        let boxes = vec![Box3D::new("A", "c", 0, false, (1, 1, 1), 6.0).unwrap()];
        let solution = Solution::empty();
        let diag = diagnose_unplaced(&boxes, &container, &solution);
        assert_eq!(diag[0].reason, UnplacedReason::TooHeavyForContainer);
    }

    #[test]
    fn fitting_but_unplaced_box_is_flagged_no_stable_position() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let boxes = vec![Box3D::new("A", "c", 0, false, (2, 2, 2), 1.0).unwrap()];
        let solution = Solution::empty();
        let diag = diagnose_unplaced(&boxes, &container, &solution);
        assert_eq!(diag[0].reason, UnplacedReason::NoStablePosition);
    }

    #[test]
    fn placed_box_is_not_reported() {
        let container = Container::single_zone((10, 10, 10), 100.0).unwrap();
        let boxes = vec![Box3D::new("A", "c", 0, false, (2, 2, 2), 1.0).unwrap()];
        let solution = Solution {
            placements: vec![Placement {
                box_id: "A".to_string(),
                origin: (0, 0, 0),
                orientation: (2, 2, 2),
                weight: 1.0,
            }],
            score: crate::model::Score::Value(1.0),
        };
        let diag = diagnose_unplaced(&boxes, &container, &solution);
        assert!(diag.is_empty());
    }
}
