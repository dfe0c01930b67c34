//! Classifying pre-captured pages with a coefficient-parametrized ruleset.
//!
//! Capturing pages and parsing their markup happen elsewhere; this module
//! reads their output (`elements.json` and `nodes.json` per sample) and
//! exposes "number of misclassified samples" as a [`Problem`] cost.

pub mod ruleset;
pub mod sample;

pub use self::ruleset::ComicRuleset;
pub use self::sample::{Corpus, Element, Node, Rect, Sample};

use crate::error::{AnnealError, AnnealResult};
use crate::problem::{Problem, ProblemStats};
use fastrand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

/// One pass of a parametrized ruleset over a whole corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusRun {
    pub number: usize,
    pub number_wrong: usize,
}

impl CorpusRun {
    pub fn new(corpus: &Corpus, coeffs: &[f64]) -> Self {
        let rules = ComicRuleset::from_coefficients(coeffs);
        let mut run = Self {
            number: 0,
            number_wrong: 0,
        };
        for sample in &corpus.samples {
            if !rules.is_correct(sample) {
                run.number_wrong += 1;
                debug!("Wrong answer for {}", sample.name);
            }
            run.number += 1;
        }
        run
    }

    /// Misclassified sample count. Lower is better.
    pub fn score(&self) -> usize {
        self.number_wrong
    }

    /// Percentage classified correctly.
    pub fn human_score(&self) -> f64 {
        if self.number == 0 {
            return 0.0;
        }
        (1.0 - self.number_wrong as f64 / self.number as f64) * 100.0
    }
}

/// Ruleset coefficients as a search space over a preloaded corpus.
pub struct CorpusProblem {
    corpus: Arc<Corpus>,
    initial: Vec<f64>,
    stats: ProblemStats,
}

impl CorpusProblem {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            initial: vec![10.0],
            stats: ProblemStats::default(),
        }
    }

    /// Starting coefficients must be finite and non-negative; the walk
    /// never leaves that region.
    pub fn with_initial(mut self, coeffs: Vec<f64>) -> AnnealResult<Self> {
        validate_coefficients(&coeffs)?;
        self.initial = coeffs;
        Ok(self)
    }
}

pub fn validate_coefficients(coeffs: &[f64]) -> AnnealResult<()> {
    if let Some((i, c)) = coeffs
        .iter()
        .enumerate()
        .find(|(_, c)| !(**c >= 0.0) || !c.is_finite())
    {
        return Err(AnnealError::Config(format!(
            "coefficients must be finite and non-negative, got {} at index {}",
            c, i
        )));
    }
    Ok(())
}

impl Problem for CorpusProblem {
    type Solution = Vec<f64>;

    fn name(&self) -> &str {
        "CorpusScoring"
    }

    fn initial_solution(&self) -> Vec<f64> {
        self.initial.clone()
    }

    /// Nudges a random coefficient by ±1. Both the coefficient and the
    /// direction are redrawn until the result is non-negative; negative
    /// weights make rule scores flip sign. When no coefficient can reach
    /// zero or above, the solution is returned unchanged.
    fn random_transition(&self, coeffs: &Vec<f64>, rng: &mut Rng) -> Vec<f64> {
        self.stats.record_transition();
        let mut next = coeffs.clone();
        if !next.iter().any(|&c| c + 1.0 >= 0.0) {
            if !next.is_empty() {
                warn!("No coefficient of {:?} can be nudged, keeping them", next);
            }
            return next;
        }

        let (element, nudge) = loop {
            let element = rng.usize(0..next.len());
            let nudge = if rng.bool() { -1.0 } else { 1.0 };
            if next[element] + nudge >= 0.0 {
                break (element, nudge);
            }
        };
        next[element] += nudge;
        next
    }

    fn solution_cost(&self, coeffs: &Vec<f64>) -> AnnealResult<f64> {
        self.stats.record_cost();
        Ok(CorpusRun::new(&self.corpus, coeffs).score() as f64)
    }

    fn stats(&self) -> &ProblemStats {
        &self.stats
    }
}
