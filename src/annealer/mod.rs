pub mod cache;

use self::cache::MemoCache;
use crate::config::AnnealParams;
use crate::error::{AnnealError, AnnealResult};
use crate::problem::{CanonicalKey, Problem};
use fastrand::Rng;
use tracing::debug;

/// Boltzmann's constant, in J/K.
pub const BOLTZMANN: f64 = 1.3806485279e-23;

/// How the probability of taking a non-improving move is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// `exp(-Δ / T)`
    Metropolis,
    /// `exp(-Δ / (k_B · T))`. At any practical temperature this only ever
    /// takes equal-cost moves.
    Boltzmann,
}

impl Acceptance {
    /// `minus_delta` is `current_cost - candidate_cost`, never positive here.
    #[inline]
    pub fn merit(self, minus_delta: f64, temperature: f64) -> f64 {
        match self {
            Acceptance::Metropolis => (minus_delta / temperature).exp(),
            Acceptance::Boltzmann => (minus_delta / (BOLTZMANN * temperature)).exp(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnealOutcome<S> {
    /// Lowest-cost solution seen, not where the chain ended.
    pub best: S,
    pub best_cost: f64,
    /// Candidates drawn, across all cooling steps.
    pub iterations: usize,
    /// Non-improving moves that were accepted.
    pub uphill_moves: usize,
    pub final_temperature: f64,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Incumbent cost at the end of each cooling step.
    pub cost_history: Vec<f64>,
}

/// Geometric-cooling simulated annealer.
#[derive(Debug, Clone)]
pub struct Annealer {
    params: AnnealParams,
    acceptance: Acceptance,
    memoize: bool,
}

impl Annealer {
    /// Memoizing annealer with Metropolis acceptance.
    pub fn new(params: AnnealParams) -> Self {
        Self {
            params,
            acceptance: Acceptance::Metropolis,
            memoize: true,
        }
    }

    /// Non-memoizing annealer that scales the temperature by Boltzmann's
    /// constant before computing merit.
    pub fn boltzmann(params: AnnealParams) -> Self {
        Self {
            params,
            acceptance: Acceptance::Boltzmann,
            memoize: false,
        }
    }

    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn params(&self) -> &AnnealParams {
        &self.params
    }

    pub fn acceptance(&self) -> Acceptance {
        self.acceptance
    }

    pub fn memoizes(&self) -> bool {
        self.memoize
    }

    /// Runs the cooling schedule over `problem` and returns the best
    /// solution seen. Any evaluation failure aborts the run.
    pub fn anneal<P: Problem>(
        &self,
        problem: &P,
        rng: &mut Rng,
    ) -> AnnealResult<AnnealOutcome<P::Solution>> {
        self.params.validate()?;

        let mut temperature = self.params.initial_temperature;
        let mut current = problem.initial_solution();
        let mut current_cost = evaluate(problem, &current)?;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut cache: MemoCache<<P::Solution as CanonicalKey>::Key> = MemoCache::new();
        let mut iterations = 0usize;
        let mut uphill_moves = 0usize;
        let mut cost_history = Vec::with_capacity(self.params.cooling_steps);

        for _ in 0..self.params.cooling_steps {
            let start_cost = current_cost;

            for _ in 0..self.params.steps_per_temperature {
                let candidate = problem.random_transition(&current, rng);
                let candidate_cost = if self.memoize {
                    cache.get_or_compute(&candidate, || evaluate(problem, &candidate))?
                } else {
                    evaluate(problem, &candidate)?
                };

                if candidate_cost < current_cost {
                    current = candidate;
                    current_cost = candidate_cost;
                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                        debug!(
                            "[{}] new best {} with cost {}",
                            problem.name(),
                            problem.describe(&best),
                            best_cost
                        );
                    }
                } else {
                    let merit = self
                        .acceptance
                        .merit(current_cost - candidate_cost, temperature);
                    if rng.f64() < merit {
                        uphill_moves += 1;
                        current = candidate;
                        current_cost = candidate_cost;
                    }
                }
                iterations += 1;

                // Chain isn't moving at this temperature
                if current_cost == start_cost {
                    break;
                }
            }

            temperature *= self.params.cooling_fraction;
            cost_history.push(best_cost);
        }

        debug!(
            "[{}] {} iterations, {} uphill moves, cache hits {} misses {}",
            problem.name(),
            iterations,
            uphill_moves,
            cache.hits(),
            cache.misses()
        );

        Ok(AnnealOutcome {
            best,
            best_cost,
            iterations,
            uphill_moves,
            final_temperature: temperature,
            cache_hits: cache.hits(),
            cache_misses: cache.misses(),
            cost_history,
        })
    }
}

fn evaluate<P: Problem>(problem: &P, solution: &P::Solution) -> AnnealResult<f64> {
    let cost = problem.solution_cost(solution)?;
    if cost.is_nan() {
        return Err(AnnealError::Evaluation {
            problem: problem.name().to_string(),
            solution: solution.encode(),
            reason: "cost is NaN".into(),
        });
    }
    Ok(cost)
}
