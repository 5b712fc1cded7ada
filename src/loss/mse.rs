use crate::{math::matrix::MatView, network::network::Network};

pub struct MseLoss;

impl MseLoss {
    /// Summed squared error between two rows of equal shape.
    pub fn loss(predicted: MatView<'_>, expected: MatView<'_>) -> f32 {
        assert!(
            predicted.rows() == expected.rows() && predicted.cols() == expected.cols(),
            "loss shape mismatch: predicted {}x{}, expected {}x{}",
            predicted.rows(),
            predicted.cols(),
            expected.rows(),
            expected.cols()
        );
        let mut sum = 0.0;
        for i in 0..predicted.rows() {
            for j in 0..predicted.cols() {
                let d = predicted[(i, j)] - expected[(i, j)];
                sum += d * d;
            }
        }
        sum
    }

    /// Mean over examples of the per-example summed squared error.
    ///
    /// Each row of `inputs` is copied into the network's input row and run
    /// forward with [`Network::COST_ACTIVATION`]. The network's activations
    /// are overwritten; its parameters are not touched.
    ///
    /// # Panics
    /// Panics if the example counts differ, there are no examples, or the
    /// target width differs from the output width.
    pub fn cost(network: &mut Network, inputs: MatView<'_>, targets: MatView<'_>) -> f32 {
        assert_eq!(
            inputs.rows(),
            targets.rows(),
            "inputs and targets must have the same number of examples"
        );
        assert!(inputs.rows() > 0, "cost needs at least one example");
        assert_eq!(
            targets.cols(),
            network.output().cols(),
            "target width must match the network output width"
        );

        let n = inputs.rows();
        let mut total = 0.0;
        for i in 0..n {
            network.input_mut().copy_from(inputs.row(i));
            network.forward(Network::COST_ACTIVATION);
            total += MseLoss::loss(network.output().view(), targets.row(i));
        }
        total / n as f32
    }
}
