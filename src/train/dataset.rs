use serde::{Serialize, Deserialize};

use crate::config::error::{ConfigError, Result};
use crate::math::matrix::MatView;

/// Training table stored as one flat row-major buffer.
///
/// Each row holds `input_cols` inputs followed by `target_cols` targets,
/// padded out to `stride`. `inputs()` and `targets()` are two views over
/// the same buffer that differ only in their column offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub data: Vec<f32>,
    pub stride: usize,
    pub input_cols: usize,
    pub target_cols: usize,
}

impl Dataset {
    /// # Panics
    /// Panics if the layout does not fit; see [`Dataset::validate`].
    pub fn new(data: Vec<f32>, stride: usize, input_cols: usize, target_cols: usize) -> Dataset {
        let dataset = Dataset { data, stride, input_cols, target_cols };
        if let Err(e) = dataset.validate() {
            panic!("{e}");
        }
        dataset
    }

    /// The four XOR examples `(a, b) -> a ^ b`.
    pub fn xor() -> Dataset {
        Dataset::new(
            vec![
                0.0, 0.0, 0.0,
                0.0, 1.0, 1.0,
                1.0, 0.0, 1.0,
                1.0, 1.0, 0.0,
            ],
            3,
            2,
            1,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_cols == 0 || self.target_cols == 0 {
            return Err(ConfigError::Invalid(
                "dataset needs at least one input and one target column".into(),
            ));
        }
        if self.input_cols + self.target_cols > self.stride {
            return Err(ConfigError::Invalid(format!(
                "{} input + {} target columns do not fit in stride {}",
                self.input_cols, self.target_cols, self.stride
            )));
        }
        if self.data.is_empty() || self.data.len() % self.stride != 0 {
            return Err(ConfigError::Invalid(format!(
                "dataset length {} is not a positive multiple of stride {}",
                self.data.len(),
                self.stride
            )));
        }
        Ok(())
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.data.len() / self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn table(&self) -> MatView<'_> {
        MatView::new(&self.data, self.len(), self.stride, self.stride)
    }

    pub fn inputs(&self) -> MatView<'_> {
        self.table().columns(0, self.input_cols)
    }

    pub fn targets(&self) -> MatView<'_> {
        self.table().columns(self.input_cols, self.target_cols)
    }
}
