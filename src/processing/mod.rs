/*! Corpus processing

Batch transformations over corpora and scorer outputs:

- [format]: word-type extraction, the format fed to the phonotactic scorer,
- [merge]: symbol rewriting on formatted corpora,
- [folds]: cross-validation splits,
- [clean]: removal of unseen cases in scorer CSVs,
- [stats]: size statistics of generated samples.
!*/
pub mod clean;
pub mod folds;
pub mod format;
pub mod merge;
pub mod stats;

pub use format::{process_corpus, space_chars, HeldOutPolicy};
