use crate::reports;
use annealforge::annealer::Annealer;
use annealforge::config::Config;
use annealforge::error::AnnealResult;
use annealforge::scorer::{BenchmarkProblem, QualityScorer};
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub config: Config,

    /// Run problem/optimizer pairs on all cores
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

/// Compares the memoizing Metropolis annealer with the Boltzmann-scaled one
/// under the same schedule.
pub fn run(config: &Config, parallel: bool, seed: u64) -> AnnealResult<()> {
    config.anneal.validate()?;
    info!("📊 Benchmarking annealers (seed {})", seed);

    let scorer = QualityScorer::new(
        vec![BenchmarkProblem::OscillatingCost, BenchmarkProblem::BinPacking],
        vec![
            ("Annealer".to_string(), Annealer::new(config.anneal)),
            ("BoltzmannAnnealer".to_string(), Annealer::boltzmann(config.anneal)),
        ],
    )
    .with_seed(seed)
    .with_parallel(parallel);

    let report = scorer.score()?;
    reports::print_benchmark_report(&report);
    Ok(())
}
