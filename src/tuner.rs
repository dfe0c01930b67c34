//! Tunes the annealer's own hyperparameters by annealing over them.

use crate::annealer::{AnnealOutcome, Annealer};
use crate::config::{AnnealParams, TunerParams};
use crate::error::{AnnealError, AnnealResult};
use crate::problem::{CanonicalKey, Problem, ProblemStats};
use crate::scorer::{BenchmarkProblem, QualityScorer};
use fastrand::Rng;
use tracing::{info, warn};

/// `[initial temperature, cooling steps, cooling fraction, steps per
/// temperature]` of the best-scoring run found so far.
pub const SEED_HYPERPARAMETERS: [f64; 4] = [
    10643.296506954695,
    113.30886882813805,
    0.023803813406736214,
    4.231731642265747,
];

const COOLING_FRACTION: usize = 2;

/// Annealer hyperparameters as a search space. The cost of a vector is the
/// quality score of an annealer built from it.
pub struct HyperparameterProblem {
    nudge_fraction: f64,
    max_cooling_fraction: f64,
    benchmark_seed: u64,
    problems: Vec<BenchmarkProblem>,
    parallel: bool,
    stats: ProblemStats,
}

impl HyperparameterProblem {
    pub fn new(params: &TunerParams) -> Self {
        Self {
            nudge_fraction: params.nudge_fraction,
            max_cooling_fraction: params.max_cooling_fraction,
            benchmark_seed: params.benchmark_seed,
            problems: vec![
                BenchmarkProblem::OscillatingCost,
                BenchmarkProblem::BinPacking,
                BenchmarkProblem::Linear,
            ],
            parallel: false,
            stats: ProblemStats::default(),
        }
    }

    pub fn with_problems(mut self, problems: Vec<BenchmarkProblem>) -> Self {
        self.problems = problems;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn problems(&self) -> &[BenchmarkProblem] {
        &self.problems
    }

    pub fn in_domain(&self, index: usize, value: f64) -> bool {
        value > 0.0 && (index != COOLING_FRACTION || value <= self.max_cooling_fraction)
    }
}

impl Problem for HyperparameterProblem {
    type Solution = Vec<f64>;

    fn name(&self) -> &str {
        "AnnealerHyperparameters"
    }

    fn initial_solution(&self) -> Vec<f64> {
        SEED_HYPERPARAMETERS.to_vec()
    }

    /// Nudges one hyperparameter by a fraction of its own magnitude. The
    /// four differ by orders of magnitude, so a fixed step would not do.
    fn random_transition(&self, coeffs: &Vec<f64>, rng: &mut Rng) -> Vec<f64> {
        self.stats.record_transition();
        let mut next = coeffs.clone();
        if next.is_empty() {
            return next;
        }

        let element = rng.usize(0..next.len());
        let value = next[element];
        let step = value * self.nudge_fraction;
        if !self.in_domain(element, value - step) && !self.in_domain(element, value + step) {
            warn!(
                "No valid nudge for hyperparameter {} at {}, keeping it",
                element, value
            );
            return next;
        }

        let nudge = loop {
            let candidate = if rng.bool() { -step } else { step };
            if self.in_domain(element, value + candidate) {
                break candidate;
            }
        };
        next[element] += nudge;
        next
    }

    fn solution_cost(&self, coeffs: &Vec<f64>) -> AnnealResult<f64> {
        self.stats.record_cost();
        let quality = AnnealParams::from_vector(coeffs).and_then(|params| {
            QualityScorer::new(
                self.problems.clone(),
                vec![("Annealer".to_string(), Annealer::new(params))],
            )
            .with_seed(self.benchmark_seed)
            .with_parallel(self.parallel)
            .score()
        });
        quality
            .map(|report| report.quality)
            .map_err(|e| AnnealError::Evaluation {
                problem: self.name().to_string(),
                solution: coeffs.encode(),
                reason: e.to_string(),
            })
    }

    fn stats(&self) -> &ProblemStats {
        &self.stats
    }
}

#[derive(Debug, Clone)]
pub struct TuningOutcome {
    pub params: AnnealParams,
    pub quality: f64,
    pub outer: AnnealOutcome<Vec<f64>>,
}

/// An outer annealer walking hyperparameter space. Each outer cost
/// evaluation runs a full inner annealing per benchmark problem, so the
/// outer loop is inherently sequential.
pub struct MetaTuner {
    outer: Annealer,
    problem: HyperparameterProblem,
}

impl MetaTuner {
    pub fn new(params: &TunerParams) -> AnnealResult<Self> {
        params.validate()?;
        Ok(Self {
            outer: Annealer::new(params.outer_params()),
            problem: HyperparameterProblem::new(params),
        })
    }

    pub fn from_parts(outer: Annealer, problem: HyperparameterProblem) -> Self {
        Self { outer, problem }
    }

    pub fn problem(&self) -> &HyperparameterProblem {
        &self.problem
    }

    pub fn tune(&self, rng: &mut Rng) -> AnnealResult<TuningOutcome> {
        let outer = self.outer.anneal(&self.problem, rng)?;
        let params = AnnealParams::from_vector(&outer.best)?;
        info!(
            "Tuned hyperparameters {:?} with quality {:.3} ({} outer iterations)",
            outer.best, outer.best_cost, outer.iterations
        );
        Ok(TuningOutcome {
            params,
            quality: outer.best_cost,
            outer,
        })
    }
}
