use crate::reports;
use annealforge::annealer::Annealer;
use annealforge::config::Config;
use annealforge::corpus::{Corpus, CorpusProblem, CorpusRun};
use annealforge::error::AnnealResult;
use clap::Args;
use fastrand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    #[command(flatten)]
    pub config: Config,

    /// Folder whose subdirectories are samples
    #[arg(long, default_value = "corpus/training")]
    pub corpus: PathBuf,

    /// Anneal the ruleset coefficients instead of using the configured ones
    #[arg(long, default_value_t = false)]
    pub tune: bool,
}

pub fn run(args: &CorpusArgs, config: &Config, rng: &mut Rng) -> AnnealResult<()> {
    config.corpus.validate()?;
    info!("📂 Loading corpus: {}", args.corpus.display());
    let corpus = Arc::new(Corpus::load(&args.corpus)?);

    let coeffs = if args.tune {
        info!("🔥 Tuning coefficients using simulated annealing...");
        let problem =
            CorpusProblem::new(corpus.clone()).with_initial(config.corpus.coefficients.clone())?;
        Annealer::new(config.anneal).anneal(&problem, rng)?.best
    } else {
        config.corpus.coefficients.clone()
    };

    let run = CorpusRun::new(&corpus, &coeffs);
    println!("Using coefficients {}", reports::format_coefficients(&coeffs));
    println!("% right: {:.2}", run.human_score());
    Ok(())
}
