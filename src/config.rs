use crate::error::{AnnealError, AnnealResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub anneal: AnnealParams,
    #[command(flatten)]
    pub tuner: TunerParams,
    #[command(flatten)]
    pub corpus: CorpusParams,
}

/// The four hyperparameters of one annealing run.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    #[arg(long, default_value_t = 5000.0)]
    pub initial_temperature: f64,
    #[arg(long, default_value_t = 5000)]
    pub cooling_steps: usize,
    #[arg(long, default_value_t = 0.95)]
    pub cooling_fraction: f64,
    #[arg(long, default_value_t = 1000)]
    pub steps_per_temperature: usize,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            initial_temperature: 5000.0,
            cooling_steps: 5000,
            cooling_fraction: 0.95,
            steps_per_temperature: 1000,
        }
    }
}

/// Settings for the outer search over annealer hyperparameters.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerParams {
    #[arg(long, default_value_t = 100.0)]
    pub tuner_initial_temperature: f64,
    #[arg(long, default_value_t = 40)]
    pub tuner_cooling_steps: usize,
    #[arg(long, default_value_t = 0.9)]
    pub tuner_cooling_fraction: f64,
    #[arg(long, default_value_t = 20)]
    pub tuner_steps_per_temperature: usize,

    // Relative step size when nudging one hyperparameter
    #[arg(long, default_value_t = 0.05)]
    pub nudge_fraction: f64,
    #[arg(long, default_value_t = 0.999)]
    pub max_cooling_fraction: f64,

    // Fixed so that the quality of a hyperparameter vector is a pure function
    #[arg(long, default_value_t = 0)]
    pub benchmark_seed: u64,
}

impl Default for TunerParams {
    fn default() -> Self {
        Self {
            tuner_initial_temperature: 100.0,
            tuner_cooling_steps: 40,
            tuner_cooling_fraction: 0.9,
            tuner_steps_per_temperature: 20,
            nudge_fraction: 0.05,
            max_cooling_fraction: 0.999,
            benchmark_seed: 0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusParams {
    /// Ruleset coefficients used when not tuning
    #[arg(long, value_delimiter = ',', default_value = "10")]
    pub coefficients: Vec<f64>,
}

impl Default for CorpusParams {
    fn default() -> Self {
        Self {
            coefficients: vec![10.0],
        }
    }
}

impl AnnealParams {
    pub fn new(
        initial_temperature: f64,
        cooling_steps: usize,
        cooling_fraction: f64,
        steps_per_temperature: usize,
    ) -> Self {
        Self {
            initial_temperature,
            cooling_steps,
            cooling_fraction,
            steps_per_temperature,
        }
    }

    pub fn validate(&self) -> AnnealResult<()> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err(AnnealError::Config(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if self.cooling_steps == 0 {
            return Err(AnnealError::Config("cooling_steps must be positive".into()));
        }
        if !(self.cooling_fraction > 0.0 && self.cooling_fraction < 1.0) {
            return Err(AnnealError::Config(format!(
                "cooling_fraction must be in (0, 1), got {}",
                self.cooling_fraction
            )));
        }
        if self.steps_per_temperature == 0 {
            return Err(AnnealError::Config(
                "steps_per_temperature must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Builds params from a `[temperature, cooling steps, cooling fraction,
    /// steps per temperature]` vector. Fractional counts round up, the same
    /// number of passes a `i < count` loop makes.
    pub fn from_vector(v: &[f64]) -> AnnealResult<Self> {
        let [temp, steps, fraction, per_temp] = v else {
            return Err(AnnealError::Config(format!(
                "hyperparameter vector requires 4 values, got {}",
                v.len()
            )));
        };
        if !(*steps > 0.0) || !(*per_temp > 0.0) {
            return Err(AnnealError::Config(format!(
                "step counts must be positive, got {} and {}",
                steps, per_temp
            )));
        }
        let params = Self {
            initial_temperature: *temp,
            cooling_steps: steps.ceil() as usize,
            cooling_fraction: *fraction,
            steps_per_temperature: per_temp.ceil() as usize,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.initial_temperature,
            self.cooling_steps as f64,
            self.cooling_fraction,
            self.steps_per_temperature as f64,
        ]
    }
}

impl TunerParams {
    pub fn outer_params(&self) -> AnnealParams {
        AnnealParams {
            initial_temperature: self.tuner_initial_temperature,
            cooling_steps: self.tuner_cooling_steps,
            cooling_fraction: self.tuner_cooling_fraction,
            steps_per_temperature: self.tuner_steps_per_temperature,
        }
    }

    pub fn validate(&self) -> AnnealResult<()> {
        self.outer_params().validate()?;
        if !(self.nudge_fraction > 0.0 && self.nudge_fraction < 1.0) {
            return Err(AnnealError::Config(format!(
                "nudge_fraction must be in (0, 1), got {}",
                self.nudge_fraction
            )));
        }
        if !(self.max_cooling_fraction > 0.0 && self.max_cooling_fraction < 1.0) {
            return Err(AnnealError::Config(format!(
                "max_cooling_fraction must be in (0, 1), got {}",
                self.max_cooling_fraction
            )));
        }
        Ok(())
    }
}

impl CorpusParams {
    pub fn validate(&self) -> AnnealResult<()> {
        crate::corpus::validate_coefficients(&self.coefficients)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AnnealResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every flag the user typed onto a file-loaded base config.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(anneal.initial_temperature);
        update_if_present!(anneal.cooling_steps);
        update_if_present!(anneal.cooling_fraction);
        update_if_present!(anneal.steps_per_temperature);

        update_if_present!(tuner.tuner_initial_temperature);
        update_if_present!(tuner.tuner_cooling_steps);
        update_if_present!(tuner.tuner_cooling_fraction);
        update_if_present!(tuner.tuner_steps_per_temperature);
        update_if_present!(tuner.nudge_fraction);
        update_if_present!(tuner.max_cooling_fraction);
        update_if_present!(tuner.benchmark_seed);

        update_if_present!(corpus.coefficients);
    }
}
