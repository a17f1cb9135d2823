//! Pipeline trait.
use crate::error::Error;

/// An end-to-end run over a corpus tree.
///
/// Generic over what the run produces (usually the written paths).
pub trait Pipeline<T> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn run(&self) -> Result<T, Error>;
}
