use serde::{Serialize, Deserialize};

use crate::config::error::{ConfigError, Result};

/// Architecture descriptor: the width of every layer, input first.
///
/// `[2, 4, 1]` describes two inputs, one hidden layer of four neurons and
/// a single output, i.e. two weight/bias pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used in logs and dumps.
    #[serde(default = "default_name")]
    pub name: String,
    /// Ordered layer widths; at least two entries, all positive.
    pub architecture: Vec<usize>,
}

fn default_name() -> String {
    "nn".to_string()
}

impl NetworkSpec {
    pub fn new(name: &str, architecture: &[usize]) -> NetworkSpec {
        NetworkSpec {
            name: name.to_string(),
            architecture: architecture.to_vec(),
        }
    }

    /// Number of weight/bias pairs.
    pub fn layer_count(&self) -> usize {
        self.architecture.len().saturating_sub(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.architecture.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "architecture needs at least 2 widths, got {}",
                self.architecture.len()
            )));
        }
        if let Some(pos) = self.architecture.iter().position(|&w| w == 0) {
            return Err(ConfigError::Invalid(format!("layer {pos} has zero width")));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec::new("xor", &[2, 4, 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_zero_width_architectures() {
        assert!(NetworkSpec::new("a", &[3]).validate().is_err());
        assert!(NetworkSpec::new("b", &[2, 0, 1]).validate().is_err());
        assert!(NetworkSpec::new("c", &[2, 4, 1]).validate().is_ok());
    }

    #[test]
    fn name_defaults_when_missing() {
        let spec: NetworkSpec = serde_json::from_str(r#"{"architecture": [2, 1]}"#).unwrap();
        assert_eq!(spec.name, "nn");
        assert_eq!(spec.layer_count(), 1);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("fdnet-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = NetworkSpec::new("wide", &[3, 8, 8, 2]);
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, spec);
    }
}
