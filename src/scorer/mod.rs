//! Scores annealer configurations against a benchmark suite.

pub mod geomean;

pub use self::geomean::{geo_mean, weighted_geo_mean};

use crate::annealer::Annealer;
use crate::error::AnnealResult;
use crate::problem::{BinPacking, Linear, OscillatingCost, Problem};
use fastrand::Rng;
use rayon::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Weight of each final cost in the quality score.
///
/// With transitions weighted 1, a configuration must get about 9x faster to
/// make up for a 2x worse answer.
pub const COST_WEIGHT: f64 = 3.0;
pub const TRANSITION_WEIGHT: f64 = 1.0;

/// The benchmark landscapes. Each run gets a fresh instance so counters
/// start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum BenchmarkProblem {
    OscillatingCost,
    Linear,
    BinPacking,
}

impl BenchmarkProblem {
    pub fn run(&self, annealer: &Annealer, rng: &mut Rng) -> AnnealResult<PairResult> {
        match self {
            BenchmarkProblem::OscillatingCost => run_pair(OscillatingCost::new(), annealer, rng),
            BenchmarkProblem::Linear => run_pair(Linear::new(), annealer, rng),
            BenchmarkProblem::BinPacking => run_pair(BinPacking::default(), annealer, rng),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResult {
    pub cost: f64,
    pub transitions: usize,
    pub cost_evaluations: usize,
}

fn run_pair<P: Problem>(problem: P, annealer: &Annealer, rng: &mut Rng) -> AnnealResult<PairResult> {
    let outcome = annealer.anneal(&problem, rng)?;
    let cost = problem.solution_cost(&outcome.best)?;
    Ok(PairResult {
        cost,
        transitions: problem.stats().transitions(),
        cost_evaluations: problem.stats().cost_evaluations(),
    })
}

#[derive(Debug, Clone)]
pub struct BenchmarkSample {
    pub problem: BenchmarkProblem,
    pub optimizer: String,
    pub cost: f64,
    pub transitions: usize,
    pub cost_evaluations: usize,
}

#[derive(Debug, Clone)]
pub struct QualityReport {
    /// Lower is better.
    pub quality: f64,
    /// Problem-major, in suite order.
    pub samples: Vec<BenchmarkSample>,
}

pub struct QualityScorer {
    problems: Vec<BenchmarkProblem>,
    optimizers: Vec<(String, Annealer)>,
    seed: u64,
    parallel: bool,
}

impl QualityScorer {
    pub fn new(problems: Vec<BenchmarkProblem>, optimizers: Vec<(String, Annealer)>) -> Self {
        Self {
            problems,
            optimizers,
            seed: 0,
            parallel: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Runs pairs on the rayon pool. Results do not change: every pair owns
    /// its own seeded RNG.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn score(&self) -> AnnealResult<QualityReport> {
        let pairs: Vec<(usize, BenchmarkProblem, &str, &Annealer)> = self
            .problems
            .iter()
            .flat_map(|&p| self.optimizers.iter().map(move |(n, a)| (p, n.as_str(), a)))
            .enumerate()
            .map(|(i, (p, n, a))| (i, p, n, a))
            .collect();

        let run = |&(i, problem, name, annealer): &(usize, BenchmarkProblem, &str, &Annealer)|
         -> AnnealResult<BenchmarkSample> {
            let mut rng = Rng::with_seed(self.seed.wrapping_add(i as u64));
            let r = problem.run(annealer, &mut rng)?;
            debug!(
                "{} / {}: cost {} after {} transitions",
                problem, name, r.cost, r.transitions
            );
            Ok(BenchmarkSample {
                problem,
                optimizer: name.to_string(),
                cost: r.cost,
                transitions: r.transitions,
                cost_evaluations: r.cost_evaluations,
            })
        };

        let samples: Vec<BenchmarkSample> = if self.parallel {
            pairs.par_iter().map(run).collect::<AnnealResult<_>>()?
        } else {
            pairs.iter().map(run).collect::<AnnealResult<_>>()?
        };

        let quality = aggregate(&samples)?;
        debug!(
            "geomean {:.3} | costs {:?} | transitions {:?}",
            quality,
            samples.iter().map(|s| s.cost).collect::<Vec<_>>(),
            samples.iter().map(|s| s.transitions).collect::<Vec<_>>()
        );

        Ok(QualityReport { quality, samples })
    }
}

/// All costs weighted [`COST_WEIGHT`], then all transition counts weighted
/// [`TRANSITION_WEIGHT`].
pub fn aggregate(samples: &[BenchmarkSample]) -> AnnealResult<f64> {
    let mut weights = vec![COST_WEIGHT; samples.len()];
    weights.extend(std::iter::repeat(TRANSITION_WEIGHT).take(samples.len()));

    let mut values: Vec<f64> = samples.iter().map(|s| s.cost).collect();
    values.extend(samples.iter().map(|s| s.transitions as f64));

    weighted_geo_mean(&weights, &values)
}
