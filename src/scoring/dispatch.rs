/*! Parallel dispatch of scoring tasks

Tasks are spawned on a fixed-size rayon pool and report back through a channel,
so that results are logged as soon as they complete.
A failing task never stops the others.
!*/
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;

use log::{error, info};

use crate::error::Error;

use super::{Scorer, ScoringTask};

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub succeeded: Vec<ScoringTask>,
    pub failed: Vec<(ScoringTask, Error)>,
}

impl DispatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Ensure the output folder exists, then score.
fn run_task<S: Scorer + ?Sized>(scorer: &S, task: &ScoringTask) -> Result<(), Error> {
    if let Some(parent) = task.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    scorer.score(task)
}

/// Message of a caught panic.
fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Run every task on a pool of `nb_threads` threads (`0` means one per core).
pub fn dispatch<S>(
    tasks: Vec<ScoringTask>,
    scorer: Arc<S>,
    nb_threads: usize,
) -> Result<DispatchReport, Error>
where
    S: Scorer + ?Sized + 'static,
{
    let nb_threads = if nb_threads == 0 {
        num_cpus::get()
    } else {
        nb_threads
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_threads)
        .thread_name(|i| format!("scorer-{}", i))
        .build()
        .map_err(|e| Error::Custom(format!("could not build thread pool: {}", e)))?;

    let total = tasks.len();
    info!("dispatching {} tasks on {} threads", total, nb_threads);

    let (tx, rx) = mpsc::channel();
    for task in tasks {
        let tx = tx.clone();
        let scorer = Arc::clone(&scorer);
        pool.spawn(move || {
            // a panicking scorer would otherwise abort the whole pool
            let result = panic::catch_unwind(AssertUnwindSafe(|| run_task(scorer.as_ref(), &task)))
                .unwrap_or_else(|payload| {
                    Err(Error::TaskFailure {
                        task: task.to_string(),
                        reason: panic_reason(payload),
                    })
                });
            // receiver lives until every sender is dropped
            let _ = tx.send((task, result));
        });
    }
    drop(tx);

    let mut report = DispatchReport::default();
    for (task, result) in rx {
        let done = report.total() + 1;
        match result {
            Ok(()) => {
                info!("[{}/{}] done {}", done, total, task);
                report.succeeded.push(task);
            }
            Err(e) => {
                error!("[{}/{}] failed {}: {}", done, total, task, e);
                report.failed.push((task, e));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Fails on training files containing "bad", writes a CSV otherwise.
    #[derive(Default)]
    struct FakeScorer {
        calls: AtomicUsize,
    }

    impl Scorer for FakeScorer {
        fn score(&self, task: &ScoringTask) -> Result<(), Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if task.train.to_string_lossy().contains("bad") {
                return Err(Error::TaskFailure {
                    task: task.to_string(),
                    reason: "bad corpus".to_string(),
                });
            }
            std::fs::write(&task.out, "word,uni_prob\n")?;
            Ok(())
        }
    }

    fn tasks(out: &std::path::Path) -> Vec<ScoringTask> {
        ["good1", "bad1", "good2", "bad2", "good3"]
            .iter()
            .map(|name| ScoringTask {
                train: PathBuf::from(format!("{}.txt", name)),
                test: PathBuf::from("stimuli.txt"),
                out: out.join("nested").join(format!("{}.csv", name)),
            })
            .collect()
    }

    #[test]
    fn failures_are_isolated() {
        let out = tempfile::tempdir().unwrap();
        let scorer = Arc::new(FakeScorer::default());

        let report = dispatch(tasks(out.path()), Arc::clone(&scorer), 3).unwrap();

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 5);
        assert_eq!(report.total(), 5);
        assert_eq!(report.succeeded.len(), 3);
        assert_eq!(report.failed.len(), 2);
        for (task, e) in &report.failed {
            assert!(task.train.to_string_lossy().contains("bad"));
            assert!(matches!(e, Error::TaskFailure { .. }));
        }
        for task in &report.succeeded {
            assert!(task.out.exists());
        }
    }

    #[test]
    fn single_thread() {
        let out = tempfile::tempdir().unwrap();
        let report = dispatch(tasks(out.path()), Arc::new(FakeScorer::default()), 1).unwrap();
        assert_eq!(report.succeeded.len(), 3);
    }

    #[test]
    fn no_tasks() {
        let report = dispatch(Vec::new(), Arc::new(FakeScorer::default()), 0).unwrap();
        assert_eq!(report.total(), 0);
    }

    /// Panics on training files containing "bad".
    struct PanickingScorer;

    impl Scorer for PanickingScorer {
        fn score(&self, task: &ScoringTask) -> Result<(), Error> {
            if task.train.to_string_lossy().contains("bad") {
                panic!("scorer crashed on {}", task);
            }
            std::fs::write(&task.out, "word,uni_prob\n")?;
            Ok(())
        }
    }

    #[test]
    fn panics_are_isolated() {
        let out = tempfile::tempdir().unwrap();
        let report = dispatch(tasks(out.path()), Arc::new(PanickingScorer), 2).unwrap();

        assert_eq!(report.total(), 5);
        assert_eq!(report.succeeded.len(), 3);
        assert_eq!(report.failed.len(), 2);
        for (_, e) in &report.failed {
            match e {
                Error::TaskFailure { reason, .. } => assert!(reason.starts_with("panicked")),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }
}
