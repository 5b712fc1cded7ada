use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::{info, warn};

use crate::math::matrix::MatView;
use crate::network::network::Network;
use crate::optim::finite_diff::FiniteDiff;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Runs `config.epochs` rounds of finite-difference estimation followed by a
/// gradient-descent step, and returns the cost after the last update.
///
/// `gradient` is scratch space and must share `network`'s architecture.
///
/// # Early termination
/// The loop breaks early if `config.stop_flag` is set or the `progress_tx`
/// receiver has been dropped. Both are checked only between epochs, so an
/// estimate always finishes and every perturbed parameter is restored.
///
/// # Panics
/// Panics on any shape mismatch between the network, `inputs` and `targets`.
pub fn train_loop(
    network: &mut Network,
    gradient: &mut Network,
    inputs: MatView<'_>,
    targets: MatView<'_>,
    config: &TrainConfig,
) -> f32 {
    let estimator = FiniteDiff::new(config.epsilon);
    let optimizer = Sgd::new(config.learning_rate);

    info!(
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        epsilon = config.epsilon,
        parameters = network.parameter_count(),
        examples = inputs.rows(),
        "starting training"
    );

    for epoch in 1..=config.epochs {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                warn!(epoch, "stop requested, ending training early");
                break;
            }
        }

        let t_start = Instant::now();
        let cost = estimator.estimate_gradient(network, gradient, inputs, targets);
        optimizer.apply_gradient(network, gradient);
        let elapsed_us = t_start.elapsed().as_micros() as u64;

        if config.log_every > 0 && epoch % config.log_every == 0 {
            info!(epoch, cost, "epoch");
        }

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                cost,
                elapsed_us,
            };
            if tx.send(stats).is_err() {
                warn!(epoch, "progress receiver dropped, ending training early");
                break;
            }
        }
    }

    let cost = network.cost(inputs, targets);
    info!(cost, "training finished");
    cost
}
