use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::config::error::{ConfigError, Result};
use crate::network::spec::NetworkSpec;
use crate::train::dataset::Dataset;
use crate::train::train_config::TrainConfig;

/// Everything a training run needs, loadable from one JSON file.
///
/// Every field has a default, so `{}` describes the stock XOR run:
///
/// ```json
/// {
///   "seed": 42,
///   "init_low": 0.0,
///   "init_high": 1.0,
///   "network": { "name": "xor", "architecture": [2, 4, 1] },
///   "train": { "epochs": 100000, "learning_rate": 0.1, "epsilon": 0.1 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for parameter initialisation; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub init_low: f32,
    pub init_high: f32,
    pub network: NetworkSpec,
    pub dataset: Dataset,
    pub train: TrainConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            seed: None,
            init_low: 0.0,
            init_high: 1.0,
            network: NetworkSpec::default(),
            dataset: Dataset::xor(),
            train: TrainConfig::default(),
        }
    }
}

impl RunConfig {
    /// Reads and validates a run config from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.dataset.validate()?;
        self.train.validate()?;

        let (low, high) = (self.init_low, self.init_high);
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(ConfigError::Invalid(format!(
                "init range [{low}, {high}) is empty or not finite"
            )));
        }

        let arch = &self.network.architecture;
        let (input, output) = (arch[0], arch[arch.len() - 1]);
        if self.dataset.input_cols != input || self.dataset.target_cols != output {
            return Err(ConfigError::Invalid(format!(
                "dataset has {} inputs and {} targets but the network maps {input} -> {output}",
                self.dataset.input_cols, self.dataset.target_cols
            )));
        }
        Ok(())
    }

    /// Generator owned by this run, seeded from `seed` when present.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
