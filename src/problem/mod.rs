//! The search-space contract consumed by the annealer, plus the benchmark
//! landscapes used to score annealer configurations.

pub mod bin_packing;
pub mod linear;
pub mod oscillating;

pub use self::bin_packing::BinPacking;
pub use self::linear::Linear;
pub use self::oscillating::OscillatingCost;

use crate::error::AnnealResult;
use fastrand::Rng;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// A value-based lookup key for a solution.
///
/// Two solutions with the same components in the same order must produce
/// equal keys, however they were built. Keys are exact: no tolerance is
/// applied to floating point components.
pub trait CanonicalKey {
    type Key: Eq + Hash;

    fn canonical_key(&self) -> Self::Key;

    /// Human-readable encoding used in logs and error messages.
    fn encode(&self) -> String;
}

impl CanonicalKey for Vec<f64> {
    type Key = Vec<u64>;

    fn canonical_key(&self) -> Vec<u64> {
        // -0.0 and 0.0 are the same coordinate
        self.iter()
            .map(|&x| if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() })
            .collect()
    }

    fn encode(&self) -> String {
        self.iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl CanonicalKey for Vec<Vec<u32>> {
    type Key = Vec<Vec<u32>>;

    fn canonical_key(&self) -> Vec<Vec<u32>> {
        self.clone()
    }

    fn encode(&self) -> String {
        self.iter()
            .map(|bin| {
                bin.iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Diagnostic counters. They never influence the search itself.
#[derive(Debug, Default)]
pub struct ProblemStats {
    transitions: AtomicUsize,
    cost_evaluations: AtomicUsize,
}

impl ProblemStats {
    pub fn record_transition(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cost(&self) {
        self.cost_evaluations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn transitions(&self) -> usize {
        self.transitions.load(Ordering::Relaxed)
    }

    pub fn cost_evaluations(&self) -> usize {
        self.cost_evaluations.load(Ordering::Relaxed)
    }
}

/// An optimization instance: where to start, how to move, what it costs.
///
/// `solution_cost` must be a pure function of its input; the annealer
/// memoizes it by [`CanonicalKey`].
pub trait Problem {
    type Solution: Clone + CanonicalKey;

    fn name(&self) -> &str;

    /// Deterministic seed point, identical on every call.
    fn initial_solution(&self) -> Self::Solution;

    /// Returns a new solution one local perturbation away from `solution`.
    ///
    /// Domain constraints are met by resampling the perturbation, never by
    /// clamping, so the walk is not biased toward the boundary.
    fn random_transition(&self, solution: &Self::Solution, rng: &mut Rng) -> Self::Solution;

    fn solution_cost(&self, solution: &Self::Solution) -> AnnealResult<f64>;

    /// Short rendering for logs.
    fn describe(&self, solution: &Self::Solution) -> String {
        solution.encode()
    }

    fn stats(&self) -> &ProblemStats;
}

/// Moves one uniformly chosen coordinate by `±step`, redrawing the direction
/// until the coordinate stays non-negative. A coordinate that neither
/// direction can bring to `>= 0` is left alone.
pub fn nudge_coordinate(coeffs: &[f64], step: f64, rng: &mut Rng) -> Vec<f64> {
    let mut next = coeffs.to_vec();
    if next.is_empty() {
        return next;
    }

    let element = rng.usize(0..next.len());
    let value = next[element];
    if !(value - step >= 0.0) && !(value + step >= 0.0) {
        warn!("No valid nudge for coordinate {} at {}, keeping it", element, value);
        return next;
    }

    let nudge = loop {
        let candidate = if rng.bool() { -step } else { step };
        if next[element] + candidate >= 0.0 {
            break candidate;
        }
    };

    next[element] += nudge;
    next
}

/// `Math.round` semantics: halves round toward positive infinity.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
