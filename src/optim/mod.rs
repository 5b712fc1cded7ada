pub mod finite_diff;
pub mod sgd;

pub use finite_diff::FiniteDiff;
pub use sgd::Sgd;
