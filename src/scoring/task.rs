//! Scoring tasks: a training corpus, a test stimuli file and an output CSV.
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;
use crate::io::reader::glob_under;

/// Test stimuli sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    Bigram,
    Both,
    Unigram,
}

impl Contrast {
    pub const ALL: [Contrast; 3] = [Contrast::Bigram, Contrast::Both, Contrast::Unigram];

    pub fn name(&self) -> &'static str {
        match self {
            Contrast::Bigram => "bigram_contrast",
            Contrast::Both => "both_contrast",
            Contrast::Unigram => "unigram_contrast",
        }
    }

    /// Stimuli file location inside `stimuli_dir`.
    pub fn stimuli_path(&self, stimuli_dir: &Path) -> PathBuf {
        stimuli_dir.join(format!("{}_stimuli.txt", self.name()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoringTask {
    pub train: PathBuf,
    pub test: PathBuf,
    pub out: PathBuf,
}

impl fmt::Display for ScoringTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.train.display(),
            self.test.display(),
            self.out.display()
        )
    }
}

/// Every regular file under `root`, sorted.
fn training_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    if !root.is_dir() {
        return Err(Error::MissingFile(root.to_path_buf()));
    }
    let files = glob_under(root, "**/*")?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    Ok(files)
}

/// Build a task for each (training file, contrast) pair.
///
/// Outputs mirror the training tree: `<out_root>/<relative dir>/<stem>_<contrast>.csv`.
/// Contrasts whose stimuli file is missing are skipped.
pub fn enumerate_tasks(
    train_root: &Path,
    stimuli_dir: &Path,
    out_root: &Path,
) -> Result<Vec<ScoringTask>, Error> {
    let contrasts: Vec<(Contrast, PathBuf)> = Contrast::ALL
        .iter()
        .filter_map(|c| {
            let path = c.stimuli_path(stimuli_dir);
            if path.is_file() {
                Some((*c, path))
            } else {
                warn!("no stimuli for {} at {:?}, skipping", c.name(), path);
                None
            }
        })
        .collect();

    let mut tasks = Vec::new();
    for train in training_files(train_root)? {
        let relative_dir = train
            .strip_prefix(train_root)
            .ok()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        let stem = train
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        for (contrast, test) in &contrasts {
            let out = out_root
                .join(relative_dir)
                .join(format!("{}_{}.csv", stem, contrast.name()));
            tasks.push(ScoringTask {
                train: train.clone(),
                test: test.clone(),
                out,
            });
        }
    }

    debug!("{} scoring tasks", tasks.len());
    Ok(tasks)
}
