//! Scorer trait and external scorer.
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::error::Error;

use super::ScoringTask;

/// Computes n-gram/phonotactic scores of a test set given a training corpus.
///
/// Implementors are shared between worker threads.
pub trait Scorer: Send + Sync {
    fn score(&self, task: &ScoringTask) -> Result<(), Error>;
}

/// Runs an external program as `<program> [args...] <train> <test> <out>`.
#[derive(Debug, Clone)]
pub struct ExternalScorer {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalScorer {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl Scorer for ExternalScorer {
    fn score(&self, task: &ScoringTask) -> Result<(), Error> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&task.train)
            .arg(&task.test)
            .arg(&task.out);
        debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|e| Error::TaskFailure {
            task: task.to_string(),
            reason: format!("could not run {:?}: {}", self.program, e),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::TaskFailure {
                task: task.to_string(),
                reason: format!(
                    "{} ({})",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            })
        }
    }
}
