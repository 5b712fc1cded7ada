use rand::Rng;
use std::fmt;
use tracing::debug;

use crate::{
    activation::activation::ActivationFunction,
    loss::mse::MseLoss,
    math::matrix::{MatView, Matrix},
    network::spec::NetworkSpec,
};

/// Fully connected feedforward network stored as flat matrices.
///
/// For `L` layers there are `L` weight matrices, `L` bias rows and `L + 1`
/// activation rows. `weights[i]` is `width[i] x width[i + 1]`; `biases[i]`
/// and `activations[i + 1]` are `1 x width[i + 1]`. Activations are scratch
/// space rewritten by every forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Matrix>,
    pub(crate) activations: Vec<Matrix>,
}

impl Network {
    /// Activation the cost function runs the network with, whatever a caller
    /// uses for manual forward passes.
    pub const COST_ACTIVATION: ActivationFunction = ActivationFunction::Sigmoid;

    /// Allocates a zeroed network from layer widths, input first.
    ///
    /// # Panics
    /// Panics if fewer than two widths are given or any width is zero.
    pub fn new(architecture: &[usize]) -> Network {
        assert!(
            architecture.len() >= 2,
            "architecture needs at least 2 widths, got {}",
            architecture.len()
        );
        assert!(
            architecture.iter().all(|&w| w > 0),
            "architecture widths must be positive: {architecture:?}"
        );

        let count = architecture.len() - 1;
        let mut weights = Vec::with_capacity(count);
        let mut biases = Vec::with_capacity(count);
        let mut activations = Vec::with_capacity(count + 1);

        activations.push(Matrix::alloc(1, architecture[0]));
        for pair in architecture.windows(2) {
            weights.push(Matrix::alloc(pair[0], pair[1]));
            biases.push(Matrix::alloc(1, pair[1]));
            activations.push(Matrix::alloc(1, pair[1]));
        }

        debug!(?architecture, "allocated network");
        Network { weights, biases, activations }
    }

    pub fn from_spec(spec: &NetworkSpec) -> Network {
        Network::new(&spec.architecture)
    }

    /// A zeroed network with the same architecture, used to hold gradient
    /// estimates.
    pub fn gradient_buffer(&self) -> Network {
        Network::new(&self.architecture())
    }

    pub fn architecture(&self) -> Vec<usize> {
        self.activations.iter().map(|a| a.cols()).collect()
    }

    /// Number of weight/bias pairs.
    pub fn layer_count(&self) -> usize {
        self.weights.len()
    }

    /// Total number of trainable scalars.
    pub fn parameter_count(&self) -> usize {
        self.weights
            .iter()
            .chain(self.biases.iter())
            .map(|m| m.rows() * m.cols())
            .sum()
    }

    pub fn weight(&self, layer: usize) -> &Matrix {
        &self.weights[layer]
    }

    pub fn weight_mut(&mut self, layer: usize) -> &mut Matrix {
        &mut self.weights[layer]
    }

    pub fn bias(&self, layer: usize) -> &Matrix {
        &self.biases[layer]
    }

    pub fn bias_mut(&mut self, layer: usize) -> &mut Matrix {
        &mut self.biases[layer]
    }

    pub fn input(&self) -> &Matrix {
        &self.activations[0]
    }

    /// Row that `forward` reads from. Populate it before every pass.
    pub fn input_mut(&mut self) -> &mut Matrix {
        &mut self.activations[0]
    }

    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }

    /// Fills every weight and bias uniformly from `[low, high)`.
    /// Activations are left alone.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        for (w, b) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            w.randomize(rng, low, high);
            b.randomize(rng, low, high);
        }
    }

    /// `a[i + 1] = f(a[i] . W[i] + b[i])` for every layer. `a[0]` is untouched.
    pub fn forward(&mut self, activation: ActivationFunction) {
        for i in 0..self.weights.len() {
            let (done, rest) = self.activations.split_at_mut(i + 1);
            let next = &mut rest[0];
            next.dot(done[i].view(), self.weights[i].view());
            next.sum_in_place(self.biases[i].view());
            next.apply(|x| activation.function(x));
        }
    }

    /// Copies `input` into the input row, runs a forward pass and returns
    /// the output row.
    pub fn predict(&mut self, input: &[f32], activation: ActivationFunction) -> MatView<'_> {
        self.activations[0].copy_from(MatView::new(input, 1, input.len(), input.len()));
        self.forward(activation);
        self.output().view()
    }

    /// Mean over examples of the summed squared output error.
    /// See [`MseLoss::cost`].
    pub fn cost(&mut self, inputs: MatView<'_>, targets: MatView<'_>) -> f32 {
        MseLoss::cost(self, inputs, targets)
    }

    /// Text dump of every weight and bias matrix.
    pub fn render(&self, name: &str) -> String {
        let mut out = format!("{name} = [\n");
        for (i, (w, b)) in self.weights.iter().zip(self.biases.iter()).enumerate() {
            out.push_str(&w.render(&format!("ws{i}"), 4));
            out.push_str(&b.render(&format!("bs{i}"), 4));
        }
        out.push_str("]\n");
        out
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("nn"))
    }
}
