use serde::{Serialize, Deserialize};

/// Per-epoch statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` at the end of every completed epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Cost measured before this epoch's update.
    pub cost: f32,
    /// Wall-clock time of the estimate and update, in microseconds.
    pub elapsed_us: u64,
}
