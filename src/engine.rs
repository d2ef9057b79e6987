//! Engine entry point: ties the RCH driver, formatter, and diagnostics
//! together into the two calls the rest of the crate (chiefly `api`) needs.

use crate::diagnostics::{self, UnplacedBox};
use crate::driver::{self, RchConfig};
use crate::formatter::{self, LabelVolume};
use crate::model::{Box3D, Container, Solution};

/// Runs the RCH over `boxes` against `container` and returns the best
/// solution found among `config.iterations` independent attempts.
pub fn optimize(boxes: &[Box3D], container: &Container, config: &RchConfig) -> Solution {
    driver::run(boxes, container, config)
}

/// Convenience wrapper: runs [`optimize`] and renders the result straight
/// to a dense 3D label volume plus the unplaced-box diagnostics.
pub fn optimize_to_label_volume(
    boxes: &[Box3D],
    container: &Container,
    config: &RchConfig,
) -> (LabelVolume, Solution, Vec<UnplacedBox>) {
    let solution = optimize(boxes, container, config);
    let volume = formatter::format_to_label_volume(&solution, container);
    let unplaced = diagnostics::diagnose_unplaced(boxes, container, &solution);
    (volume, solution, unplaced)
}
