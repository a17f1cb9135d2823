//! Sample size statistics
//!
//! Summarizes the size (in lines) of generated samples laid out as `<root>/<model>/<condition>/<sample>.txt`,
//! producing a table with a row per condition and a column per model, each cell being `mean (std)`.
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, error};

use crate::error::Error;
use crate::io::reader::{corpus::dir_name, glob_under, list_dirs};

/// Value of cells without any sample.
pub const NO_DATA: &str = "No Data";

/// condition -> model -> file lengths
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SizeTable {
    lengths: BTreeMap<String, BTreeMap<String, Vec<usize>>>,
}

/// Number of lines of a file.
pub fn file_length(path: &Path) -> Result<usize, Error> {
    let f = std::fs::File::open(path)?;
    let mut count = 0;
    for line in BufReader::new(f).lines() {
        line?;
        count += 1;
    }
    Ok(count)
}

/// Mean and population standard deviation.
pub fn mean_std(values: &[usize]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|v| *v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .fold(0.0, |acc: f64, v| acc + (*v as f64 - mean).powf(2.0))
        / n;
    Some((mean, var.sqrt()))
}

impl SizeTable {
    pub fn insert(&mut self, condition: &str, model: &str, lengths: Vec<usize>) {
        self.lengths
            .entry(condition.to_string())
            .or_default()
            .insert(model.to_string(), lengths);
    }

    /// Walk `root` and measure every text file.
    ///
    /// Unreadable files are logged and ignored.
    pub fn from_dir(root: &Path) -> Result<Self, Error> {
        let mut table = Self::default();

        for model_dir in list_dirs(root)? {
            let model = dir_name(&model_dir);
            for cond_dir in list_dirs(&model_dir)? {
                let condition = dir_name(&cond_dir);

                let mut lengths = Vec::new();
                for path in glob_under(&cond_dir, "*.txt")? {
                    match file_length(&path) {
                        Ok(l) => lengths.push(l),
                        Err(e) => error!("Error reading {:?}: {}", path, e),
                    }
                }
                debug!("[{}/{}] {} files", model, condition, lengths.len());
                table.insert(&condition, &model, lengths);
            }
        }

        Ok(table)
    }

    /// Every model seen, sorted.
    pub fn models(&self) -> BTreeSet<&str> {
        self.lengths
            .values()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect()
    }

    /// Formatted cell for a (condition, model) pair.
    pub fn cell(&self, condition: &str, model: &str) -> String {
        self.lengths
            .get(condition)
            .and_then(|m| m.get(model))
            .and_then(|v| mean_std(v))
            .map(|(mean, std)| format!("{:.2} ({:.2})", mean, std))
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    /// Write the table as CSV: a `Condition` column, then one column per model.
    pub fn write_csv<W: std::io::Write>(&self, out: W) -> Result<(), Error> {
        let models = self.models();
        let mut writer = csv::WriterBuilder::new().from_writer(out);

        let mut header = vec!["Condition"];
        header.extend(models.iter().copied());
        writer.write_record(&header)?;

        for condition in self.lengths.keys() {
            let mut row = vec![condition.clone()];
            row.extend(models.iter().map(|m| self.cell(condition, m)));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
