//! Segmentation outputs formatting.
//!
//! Converts every `<src>/<condition>/<seed>/Model.txt` into a word-type list
//! written at `<dst>/<condition>/<condition><seed>.txt`, ready for the scorer.
use std::collections::HashSet;
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::io::reader::{corpus::dir_name, list_dirs, load_segmented_files, SPECIAL_FOLDERS};
use crate::io::write_lines;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{process_corpus, HeldOutPolicy};

pub struct FormatCorpora {
    src: PathBuf,
    dst: PathBuf,
    skip: Vec<String>,
}

impl FormatCorpora {
    /// Skips [SPECIAL_FOLDERS] by default.
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self {
            src,
            dst,
            skip: SPECIAL_FOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn skip(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }
}

impl Pipeline<Vec<PathBuf>> for FormatCorpora {
    fn name(&self) -> &'static str {
        "format"
    }

    fn run(&self) -> Result<Vec<PathBuf>, Error> {
        let mut written = Vec::new();
        let no_held_out = HashSet::new();

        for condition_dir in list_dirs(&self.src)? {
            let condition = dir_name(&condition_dir);
            if self.skip.contains(&condition) {
                info!("Skipping {} (special folder)", condition);
                continue;
            }

            info!("Processing {}...", condition);
            let variants = load_segmented_files(&condition_dir)?;
            let out_dir = self.dst.join(&condition);

            for (seed, corpus) in variants.present() {
                let processed = process_corpus(corpus.lines(), &no_held_out, HeldOutPolicy::Drop);
                let out_file = out_dir.join(format!("{}.txt", variants.key(seed)));
                write_lines(&out_file, &processed)?;
                info!("  Saved {:?}", out_file);
                written.push(out_file);
            }
        }

        Ok(written)
    }
}
