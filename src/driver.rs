//! Randomized Constructive Heuristic driver.
//!
//! Runs `iterations` independent packing attempts — each with its own grid,
//! its own randomized box ordering, and its own RNG stream seeded off a
//! base seed and the iteration index — and keeps the best by utilization
//! and center-of-gravity stability. Iterations are embarrassingly parallel
//! and run through `rayon`; the final reduction is a deterministic
//! lexicographic comparison so the winner is the same whether the pool
//! runs sequentially or in parallel.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::evaluator::{self, center_of_gravity_xy};
use crate::grid::Grid;
use crate::model::{Box3D, Container, Score, Solution};
use crate::ordering;
use crate::packer;

/// Tunables for one RCH run.
#[derive(Clone, Copy, Debug)]
pub struct RchConfig {
    pub iterations: usize,
    pub seed: u64,
}

impl RchConfig {
    pub const DEFAULT_ITERATIONS: usize = 30;

    pub fn new(iterations: usize, seed: u64) -> Self {
        Self { iterations, seed }
    }
}

impl Default for RchConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            seed: 0,
        }
    }
}

/// Ranking key for one iteration's solution: feasibility first, then
/// utilization, then closeness of the center of gravity to the container's
/// footprint center. Larger is better; ties keep the lower iteration index.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RankKey {
    is_feasible: bool,
    placed_volume_pct: f64,
    neg_distance_from_center: f64,
}

impl RankKey {
    fn better_than(&self, other: &RankKey) -> bool {
        if self.is_feasible != other.is_feasible {
            return self.is_feasible;
        }
        if self.placed_volume_pct != other.placed_volume_pct {
            return self.placed_volume_pct > other.placed_volume_pct;
        }
        self.neg_distance_from_center > other.neg_distance_from_center
    }
}

fn rank_key(
    placements: &[crate::model::Placement],
    container: &Container,
    total_weight: f64,
    is_feasible: bool,
) -> RankKey {
    let placed_volume: i64 = placements.iter().map(|p| p.volume()).sum();
    let placed_volume_pct = if total_weight > 0.0 {
        100.0 * placed_volume as f64 / total_weight
    } else {
        0.0
    };
    let (com_x, com_y) = center_of_gravity_xy(placements, total_weight);
    let (x, y, _) = container.dims;
    let center_x = x as f64 / 2.0;
    let center_y = y as f64 / 2.0;
    let distance = ((com_x - center_x).powi(2) + (com_y - center_y).powi(2)).sqrt();
    RankKey {
        is_feasible,
        placed_volume_pct,
        neg_distance_from_center: -distance,
    }
}

/// Runs the RCH and returns the best solution among `config.iterations`
/// independent attempts. Returns an empty, `Infeasible` solution immediately
/// if the instance cannot possibly fit (total weight or volume already
/// exceeds the container).
pub fn run(boxes: &[Box3D], container: &Container, config: &RchConfig) -> Solution {
    let total_weight: f64 = boxes.iter().map(|b| b.weight).sum();
    let total_volume: i64 = boxes.iter().map(|b| b.volume()).sum();

    if total_weight > container.max_weight || total_volume > container.volume() {
        return Solution {
            placements: Vec::new(),
            score: Score::Infeasible,
        };
    }

    let dims = container.dims_vec();
    let results: Vec<(usize, Solution, RankKey)> = (0..config.iterations)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let ordered = ordering::sort_and_randomize(boxes, &mut rng);
            let mut grid = Grid::new(dims);
            let placements = packer::constructive_pack(&ordered, &mut grid);
            let score = evaluator::evaluate(&placements, container, total_weight);
            let key = rank_key(&placements, container, total_weight, score.is_feasible());
            (i, Solution { placements, score }, key)
        })
        .collect();

    let mut best: Option<(usize, Solution, RankKey)> = None;
    for (i, solution, key) in results {
        best = match best {
            None => Some((i, solution, key)),
            Some((best_i, best_solution, best_key)) => {
                if key.better_than(&best_key) {
                    Some((i, solution, key))
                } else {
                    Some((best_i, best_solution, best_key))
                }
            }
        };
    }

    best.map(|(_, solution, _)| solution).unwrap_or_else(Solution::empty)
}
