use annealforge::config::Config;
use annealforge::error::AnnealResult;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use fastrand::Rng;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config; flags given on the command line override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the bundled annealers against the benchmark problems
    Benchmark(cmd::benchmark::BenchmarkArgs),
    /// Anneal the annealer's own hyperparameters
    Tune(cmd::tune::TuneArgs),
    /// Classify a sample corpus, optionally tuning the ruleset first
    Corpus(cmd::corpus::CorpusArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚀 Initializing annealforge...");

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli, matches: &clap::ArgMatches) -> AnnealResult<()> {
    // Flags like --cooling-steps live in the subcommand's matches, not the root.
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);
    let cli_config = match &cli.command {
        Commands::Benchmark(args) => &args.config,
        Commands::Tune(args) => &args.config,
        Commands::Corpus(args) => &args.config,
    };

    let config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path);
            let mut base = Config::load_from_file(path)?;
            base.merge_from_cli(cli_config, sub_matches);
            base
        }
        None => cli_config.clone(),
    };

    let mut rng = match cli.seed {
        Some(s) => Rng::with_seed(s),
        None => Rng::new(),
    };

    match &cli.command {
        Commands::Benchmark(args) => {
            let seed = cli.seed.unwrap_or_else(|| rng.u64(..));
            cmd::benchmark::run(&config, args.parallel, seed)
        }
        Commands::Tune(args) => cmd::tune::run(&config, args.parallel, &mut rng),
        Commands::Corpus(args) => cmd::corpus::run(args, &config, &mut rng),
    }
}
