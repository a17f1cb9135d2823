/*! Symbol merging

Rewrites a symbol into another one in formatted corpora (by default `x` into `^`),
deduplicating the resulting lines.
!*/
use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::io::reader::{corpus::dir_name, glob_under, list_dirs, read_lines};
use crate::io::write_lines;

/// Replace every `from` by `to` in trimmed lines, dropping empty and duplicate results.
pub fn merge_lines<S: AsRef<str>>(lines: &[S], from: &str, to: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for line in lines {
        let word = line.as_ref().trim().replace(from, to);
        if !word.is_empty() && seen.insert(word.clone()) {
            merged.push(word);
        }
    }
    merged
}

/// Merge every `<src>/<model>/*.txt` into `<dst>/<model>/*.txt`.
///
/// Returns the number of processed files.
pub fn merge(src: &Path, dst: &Path, from: &str, to: &str) -> Result<usize, Error> {
    if from.is_empty() {
        return Err(Error::InvalidInput(
            "symbol to replace can't be empty".to_string(),
        ));
    }

    std::fs::create_dir_all(dst)?;
    let mut nb_files = 0;

    for model_dir in list_dirs(src)? {
        let model = dir_name(&model_dir);
        let dst_model = dst.join(&model);
        std::fs::create_dir_all(&dst_model)?;

        let files = glob_under(&model_dir, "*.txt")?;

        if files.is_empty() {
            warn!("[{}] no text files", model);
        }

        for src_file in files {
            let lines = read_lines(&src_file)?;
            let merged = merge_lines(&lines, from, to);

            let dst_file = dst_model.join(src_file.file_name().unwrap_or_default());
            write_lines(&dst_file, &merged)?;
            info!("Processed: {:?} -> {:?}", src_file, dst_file);
            nb_files += 1;
        }
    }

    Ok(nb_files)
}
