use serde::{Serialize, Deserialize};
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::config::error::{ConfigError, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`: number of estimate/update steps over the full dataset
/// - `learning_rate`: scale of each gradient-descent step
/// - `epsilon`: perturbation used by the finite-difference estimator
/// - `log_every`: emit an `info!` line every N epochs; `0` disables it
/// - `progress_tx`: optional channel; one `EpochStats` per epoch. If the
///   receiver is dropped the loop stops early.
/// - `stop_flag`: optional flag checked between epochs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub epsilon: f32,
    pub log_every: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, learning_rate: f32, epsilon: f32) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            epsilon,
            log_every: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if !self.learning_rate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            log_every: 10_000,
            ..TrainConfig::new(100_000, 0.1, 0.1)
        }
    }
}
