use super::{nudge_coordinate, round_half_up, CanonicalKey, Problem, ProblemStats};
use crate::error::{AnnealError, AnnealResult};
use fastrand::Rng;

/// Point at which the function is sampled. Stands in for a fixed corpus.
pub const SAMPLE_POINT: f64 = 1.8;

/// A staircase of sines over four coefficients.
///
/// The sine terms create local minima; the reciprocal terms and the linear
/// `d` term pull toward a global one. The `+ 4` offset keeps every cost
/// positive so it can feed a geometric mean.
#[derive(Debug, Default)]
pub struct OscillatingCost {
    stats: ProblemStats,
}

impl OscillatingCost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Problem for OscillatingCost {
    type Solution = Vec<f64>;

    fn name(&self) -> &str {
        "OscillatingCost"
    }

    fn initial_solution(&self) -> Vec<f64> {
        vec![10.0, 10.0, 10.0, 10.0]
    }

    fn random_transition(&self, coeffs: &Vec<f64>, rng: &mut Rng) -> Vec<f64> {
        self.stats.record_transition();
        nudge_coordinate(coeffs, 0.5, rng)
    }

    fn solution_cost(&self, coeffs: &Vec<f64>) -> AnnealResult<f64> {
        self.stats.record_cost();
        if coeffs.len() != 4 {
            return Err(AnnealError::Evaluation {
                problem: self.name().to_string(),
                solution: coeffs.encode(),
                reason: format!("expected 4 coefficients, got {}", coeffs.len()),
            });
        }
        let x = SAMPLE_POINT;
        let (a, b, c, d) = (coeffs[0], coeffs[1], coeffs[2], coeffs[3]);
        // c + 1 keeps the asymptote left of every non-negative c
        let wave = x.sin() + (x * a).sin() + (x / b) - (x / (c + 1.0));
        Ok(round_half_up(wave) + d + 4.0)
    }

    fn stats(&self) -> &ProblemStats {
        &self.stats
    }
}
