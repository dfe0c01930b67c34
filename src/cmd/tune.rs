use crate::reports;
use annealforge::annealer::Annealer;
use annealforge::config::Config;
use annealforge::error::AnnealResult;
use annealforge::problem::Problem;
use annealforge::tuner::{HyperparameterProblem, MetaTuner};
use clap::Args;
use fastrand::Rng;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TuneArgs {
    #[command(flatten)]
    pub config: Config,

    /// Score benchmark problems on all cores
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

pub fn run(config: &Config, parallel: bool, rng: &mut Rng) -> AnnealResult<()> {
    config.tuner.validate()?;
    info!("🔥 Tuning annealer hyperparameters...");

    let tuner = MetaTuner::from_parts(
        Annealer::new(config.tuner.outer_params()),
        HyperparameterProblem::new(&config.tuner).with_parallel(parallel),
    );
    let outcome = tuner.tune(rng)?;

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Coeffs: {}", reports::format_coefficients(&outcome.outer.best));
    println!("Cost: {:.4}", outcome.quality);
    println!(
        "Outer iterations: {} ({} quality evaluations)",
        outcome.outer.iterations,
        tuner.problem().stats().cost_evaluations()
    );
    reports::print_params("TUNED", &outcome.params);
    Ok(())
}
