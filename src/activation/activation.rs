use serde::{Serialize, Deserialize};
use std::f32::consts::E;

/// Element-wise activation applied to a whole layer after `a . W + b`.
///
/// The training cost always runs the network with `Sigmoid`; the other
/// variants are for manual forward passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    /// `tanh` with negative outputs clamped to zero.
    ClampedTanh,
}

impl ActivationFunction {
    pub fn function(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::ClampedTanh => x.tanh().max(0.0),
        }
    }
}
