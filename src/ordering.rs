//! Box ordering for one randomized constructive iteration.
//!
//! Produces a packing order from a deterministic base sort — boxes grouped
//! by customer id descending, higher priority first, smallest volume first
//! within a priority tie — then perturbs it with a pass of randomized
//! adjacent swaps so different iterations explore different neighborhoods
//! of the search space.
//!
//! The base sort is the key `(customer_id, priority, -volume)` sorted in
//! reverse (descending) as a whole tuple, not descending customer/priority
//! with descending volume: reversing a tuple that already negates volume
//! leaves volume ascending. This matches the source's `sort(key=...,
//! reverse=True)` rather than the looser "largest volume first" gloss.

use rand::Rng;

use crate::model::Box3D;

/// Probability that any given adjacent pair is swapped during the
/// perturbation pass.
const SWAP_PROBABILITY: f64 = 0.1;

/// Returns a new, reordered copy of `boxes`: the input is never mutated.
pub fn sort_and_randomize(boxes: &[Box3D], rng: &mut impl Rng) -> Vec<Box3D> {
    let mut ordered: Vec<Box3D> = boxes.to_vec();
    ordered.sort_by(|a, b| {
        b.customer_id
            .cmp(&a.customer_id)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.volume().cmp(&b.volume()))
    });

    for i in 0..ordered.len().saturating_sub(1) {
        if rng.gen_bool(SWAP_PROBABILITY) {
            ordered.swap(i, i + 1);
        }
    }

    ordered
}
