use super::{nudge_coordinate, Problem, ProblemStats};
use crate::error::AnnealResult;
use fastrand::Rng;

/// A linear form in five non-negative coordinates. The optimum sits at the
/// origin corner with cost 1.
#[derive(Debug, Default)]
pub struct Linear {
    stats: ProblemStats,
}

impl Linear {
    pub const COEFFICIENTS: [f64; 5] = [3.0, 4.0, 1.0, 9.0, 0.5];

    pub fn new() -> Self {
        Self::default()
    }
}

impl Problem for Linear {
    type Solution = Vec<f64>;

    fn name(&self) -> &str {
        "Linear"
    }

    fn initial_solution(&self) -> Vec<f64> {
        vec![10.0; 5]
    }

    fn random_transition(&self, coeffs: &Vec<f64>, rng: &mut Rng) -> Vec<f64> {
        self.stats.record_transition();
        nudge_coordinate(coeffs, 0.5, rng)
    }

    fn solution_cost(&self, coeffs: &Vec<f64>) -> AnnealResult<f64> {
        self.stats.record_cost();
        let dot: f64 = Self::COEFFICIENTS
            .iter()
            .zip(coeffs)
            .map(|(w, x)| w * x)
            .sum();
        // +1 keeps it above zero for the geometric mean
        Ok(dot + 1.0)
    }

    fn stats(&self) -> &ProblemStats {
        &self.stats
    }
}
