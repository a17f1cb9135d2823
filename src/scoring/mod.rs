/*! Batch scoring

Runs an external n-gram/phonotactic scorer on every (training corpus, test stimuli) pair of a directory tree.
The scorer itself is not implemented here: see [Scorer] and [ExternalScorer].
!*/
mod dispatch;
mod scorer;
mod task;

pub use dispatch::{dispatch, DispatchReport};
pub use scorer::{ExternalScorer, Scorer};
pub use task::{enumerate_tasks, Contrast, ScoringTask};
