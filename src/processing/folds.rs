/*! Cross-validation folds

Shuffles a corpus (seeded) and splits it into `n` folds,
writing a training file for each fold that leaves that fold out.
!*/
use std::path::{Path, PathBuf};

use log::info;
use rand::seq::SliceRandom;

use crate::error::Error;
use crate::io::reader::read_lines;
use crate::io::write_lines;
use crate::sampling::rng_from_seed;

use super::format::space_chars;

/// Remove whitespace and separate characters: `"yu want"` -> `"y u w a n t"`.
pub fn unsegment(line: &str) -> String {
    let joined: String = line.split_whitespace().collect();
    space_chars(&joined)
}

/// Split `lines` into `n_folds` consecutive folds of `len / n_folds` lines.
/// The remainder is appended to the last fold.
pub fn split_folds(lines: Vec<String>, n_folds: usize) -> Result<Vec<Vec<String>>, Error> {
    if n_folds == 0 {
        return Err(Error::InvalidInput(
            "number of folds must be positive".to_string(),
        ));
    }
    if lines.len() < n_folds {
        return Err(Error::InvalidInput(format!(
            "can't split {} lines into {} folds",
            lines.len(),
            n_folds
        )));
    }

    let fold_size = lines.len() / n_folds;
    let mut iter = lines.into_iter();
    let mut folds: Vec<Vec<String>> = (0..n_folds)
        .map(|_| iter.by_ref().take(fold_size).collect())
        .collect();

    if let Some(last) = folds.last_mut() {
        last.extend(iter);
    }

    Ok(folds)
}

/// Create `fold<i>_train.txt` files (1-based) in `output_dir`.
///
/// Returns the written paths.
pub fn create_folds(
    input: &Path,
    output_dir: &Path,
    n_folds: usize,
    seed: Option<u64>,
) -> Result<Vec<PathBuf>, Error> {
    let mut lines: Vec<String> = read_lines(input)?
        .iter()
        .map(|l| unsegment(l))
        .filter(|l| !l.is_empty())
        .collect();

    let mut rng = rng_from_seed(seed);
    lines.shuffle(&mut rng);

    let folds = split_folds(lines, n_folds)?;
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(n_folds);
    for i in 0..n_folds {
        let train: Vec<&String> = folds
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .flat_map(|(_, fold)| fold)
            .collect();

        let out_path = output_dir.join(format!("fold{}_train.txt", i + 1));
        write_lines(&out_path, &train)?;
        info!("Saved {:?} ({} lines)", out_path, train.len());
        written.push(out_path);
    }

    Ok(written)
}
