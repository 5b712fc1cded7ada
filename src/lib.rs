pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod config;
pub mod telemetry;

// Convenience re-exports
pub use math::matrix::{Matrix, MatView, MatViewMut};
pub use activation::activation::ActivationFunction;
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use loss::mse::MseLoss;
pub use optim::finite_diff::FiniteDiff;
pub use optim::sgd::Sgd;
pub use train::dataset::Dataset;
pub use train::train_config::TrainConfig;
pub use train::loop_fn::train_loop;
pub use config::{ConfigError, RunConfig};
