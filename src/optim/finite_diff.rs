use tracing::debug;

use crate::{math::matrix::{MatView, Matrix}, network::network::Network};

#[derive(Debug, Clone, Copy)]
enum Param {
    Weight,
    Bias,
}

impl Param {
    fn of(self, network: &Network, layer: usize) -> &Matrix {
        match self {
            Param::Weight => &network.weights[layer],
            Param::Bias => &network.biases[layer],
        }
    }

    fn of_mut(self, network: &mut Network, layer: usize) -> &mut Matrix {
        match self {
            Param::Weight => &mut network.weights[layer],
            Param::Bias => &mut network.biases[layer],
        }
    }
}

/// Forward-difference gradient estimator.
///
/// Every partial derivative costs one full pass over the dataset, so an
/// estimate is `parameter_count() + 1` cost evaluations.
#[derive(Debug, Clone, Copy)]
pub struct FiniteDiff {
    pub epsilon: f32,
}

impl FiniteDiff {
    pub fn new(epsilon: f32) -> FiniteDiff {
        FiniteDiff { epsilon }
    }

    /// Writes `(cost(p + eps) - cost(p)) / eps` for every weight and bias of
    /// `network` into the matching slot of `gradient`, and returns the
    /// unperturbed cost.
    ///
    /// Each parameter is saved, nudged, measured and restored before the next
    /// one is touched, so `network`'s parameters come back bit-identical.
    /// Only its activation scratch rows change.
    ///
    /// # Panics
    /// Panics if `gradient` does not have the same architecture as `network`,
    /// or on any shape mismatch raised by the cost.
    pub fn estimate_gradient(
        &self,
        network: &mut Network,
        gradient: &mut Network,
        inputs: MatView<'_>,
        targets: MatView<'_>,
    ) -> f32 {
        assert_eq!(
            network.architecture(),
            gradient.architecture(),
            "gradient network must share the architecture of the trained network"
        );

        let eps = self.epsilon;
        let base = network.cost(inputs, targets);

        for layer in 0..network.layer_count() {
            for param in [Param::Weight, Param::Bias] {
                let (rows, cols) = {
                    let m = param.of(network, layer);
                    (m.rows(), m.cols())
                };
                for j in 0..rows {
                    for k in 0..cols {
                        let saved = param.of(network, layer)[(j, k)];
                        param.of_mut(network, layer)[(j, k)] = saved + eps;
                        let nudged = network.cost(inputs, targets);
                        param.of_mut(network, layer)[(j, k)] = saved;
                        param.of_mut(gradient, layer)[(j, k)] = (nudged - base) / eps;
                    }
                }
            }
        }

        debug!(cost = base, parameters = network.parameter_count(), "estimated gradient");
        base
    }
}
