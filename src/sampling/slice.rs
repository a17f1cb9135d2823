//! Slice factor.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Inverse of the share of the corpus covered by one sample.
///
/// `2.0` means half of the corpus, `1.01625` means ~98.4% of it.
/// Always finite and strictly greater than `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SliceFactor(f64);

impl SliceFactor {
    pub fn new(value: f64) -> Result<Self, Error> {
        if !value.is_finite() || value <= 1.0 {
            return Err(Error::InvalidInput(format!(
                "slice factor must be a finite number greater than 1.0 (got {})",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Number of lines of a sample: `floor(corpus_size / factor)`, at least 1.
    pub fn sample_size(&self, corpus_size: usize) -> usize {
        let size = (corpus_size as f64 / self.0).floor() as usize;
        size.max(1)
    }
}

impl FromStr for SliceFactor {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|e| Error::InvalidInput(format!("invalid slice factor {:?}: {}", s, e)))?;
        Self::new(value)
    }
}

/// Shortest representation (`2`, `1.01625`). Used as output folder name.
impl fmt::Display for SliceFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
