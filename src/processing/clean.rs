/*! Scorer output cleaning

Removes unseen cases (rows whose `uni_prob` is `-inf`) from scored CSV files.
Cleaned files are written as `<stem>_cleaned.csv` so that they never overwrite their source.
!*/
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::error::Error;

/// Column holding the unigram probability.
pub const UNI_PROB: &str = "uni_prob";

/// Suffix appended to cleaned file stems.
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// `true` if the value is negative infinity, be it the `-inf` literal or a float that parses to it.
pub fn is_neg_inf(value: &str) -> bool {
    let value = value.trim();
    value == "-inf" || value.parse::<f64>().map_or(false, |v| v == f64::NEG_INFINITY)
}

/// Output path of a cleaned file.
pub fn cleaned_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}{}.csv", stem, CLEANED_SUFFIX))
}

/// `true` if `path` is the output of a previous cleaning.
pub fn is_cleaned(path: &Path) -> bool {
    path.file_stem()
        .map_or(false, |s| s.to_string_lossy().ends_with(CLEANED_SUFFIX))
}

/// Clean a single CSV file. Returns `(kept, removed)` row counts.
pub fn clean_csv(input: &Path, output: &Path) -> Result<(usize, usize), Error> {
    if input == output {
        return Err(Error::InvalidInput(format!(
            "refusing to overwrite {:?} with its cleaned version",
            input
        )));
    }

    let mut reader = csv::ReaderBuilder::new().from_path(input)?;
    let headers = reader.headers()?.clone();
    let column = headers.iter().position(|h| h == UNI_PROB).ok_or_else(|| {
        Error::Custom(format!("{:?} has no {} column", input, UNI_PROB))
    })?;

    let mut writer = csv::WriterBuilder::new().from_path(output)?;
    writer.write_record(&headers)?;

    let (mut kept, mut removed) = (0, 0);
    for record in reader.records() {
        let record = record?;
        if record.get(column).map_or(false, is_neg_inf) {
            removed += 1;
        } else {
            writer.write_record(&record)?;
            kept += 1;
        }
    }
    writer.flush()?;

    Ok((kept, removed))
}

/// Clean every `*.csv` of `input_dir` into `output_dir`.
///
/// Files that are already cleaned are ignored.
/// A failing file is logged and skipped. Returns the written paths.
pub fn clean_csvs(input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    std::fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e == "csv"))
        .filter(|p| {
            let cleaned = is_cleaned(p);
            if cleaned {
                debug!("{:?} is already cleaned, skipping", p);
            }
            !cleaned
        })
        .collect();
    inputs.sort();

    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = cleaned_path(&input, output_dir);
        match clean_csv(&input, &output) {
            Ok((kept, removed)) => {
                info!(
                    "Cleaned and saved: {:?} ({} rows kept, {} removed)",
                    output, kept, removed
                );
                written.push(output);
            }
            Err(e) => error!("could not clean {:?}: {}", input, e),
        }
    }

    Ok(written)
}
