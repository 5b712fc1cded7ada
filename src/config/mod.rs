pub mod error;
pub mod run_config;

pub use error::{ConfigError, Result};
pub use run_config::RunConfig;
