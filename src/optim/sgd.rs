use crate::network::network::Network;

pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// Subtracts `learning_rate * g` from every weight and bias, where `g` is
    /// the matching entry of `gradient`.
    ///
    /// # Panics
    /// Panics if the two networks do not share an architecture.
    pub fn apply_gradient(&self, network: &mut Network, gradient: &Network) {
        assert_eq!(
            network.architecture(),
            gradient.architecture(),
            "gradient network must share the architecture of the trained network"
        );

        let rate = self.learning_rate;
        let params = network.weights.iter_mut().chain(network.biases.iter_mut());
        let grads = gradient.weights.iter().chain(gradient.biases.iter());
        for (p, g) in params.zip(grads) {
            for j in 0..p.rows() {
                for k in 0..p.cols() {
                    p[(j, k)] -= rate * g[(j, k)];
                }
            }
        }
    }
}
