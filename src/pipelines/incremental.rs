//! Incremental exposure corpora.
//!
//! For each model corpus and each slice factor, draws `nb_samples` random samples of the corpus lines
//! and writes the word types of each sample to `<dst>/<model>/<slice_factor>/sample<i>.txt`.
//!
//! Sampled lines keep their segmentation. Lines outside of the sample are held out,
//! and handled following the [HeldOutPolicy].
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::Error;
use crate::io::reader::{corpus::dir_name, list_dirs, Corpus, MODEL_FILE};
use crate::io::write_lines;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{process_corpus, HeldOutPolicy};
use crate::sampling::{generate_samples, SamplingPolicy, SliceFactor};

pub struct IncrementalSampling {
    src: PathBuf,
    dst: PathBuf,
    slice_factors: Vec<SliceFactor>,
    nb_samples: usize,
    seed: Option<u64>,
    sampling: SamplingPolicy,
    held_out: HeldOutPolicy,
    model_file: String,
    model_name: Option<String>,
}

impl IncrementalSampling {
    /// `src` is either a corpus file, or a folder containing a `<model>/Model.txt` per model.
    pub fn new(
        src: PathBuf,
        dst: PathBuf,
        slice_factors: Vec<SliceFactor>,
        nb_samples: usize,
    ) -> Self {
        Self {
            src,
            dst,
            slice_factors,
            nb_samples,
            seed: None,
            sampling: SamplingPolicy::default(),
            held_out: HeldOutPolicy::default(),
            model_file: MODEL_FILE.to_string(),
            model_name: None,
        }
    }

    /// Seed used for every (model, slice factor) pair.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn held_out(mut self, held_out: HeldOutPolicy) -> Self {
        self.held_out = held_out;
        self
    }

    /// Corpus file name looked up in each model folder.
    pub fn model_file(mut self, model_file: String) -> Self {
        self.model_file = model_file;
        self
    }

    /// Model name when `src` is a single file. Defaults to the name of its parent folder.
    pub fn model_name(mut self, model_name: Option<String>) -> Self {
        self.model_name = model_name;
        self
    }

    /// List (model name, corpus) pairs to sample from.
    fn corpora(&self) -> Result<Vec<(String, Corpus)>, Error> {
        if self.src.is_file() {
            let name = match &self.model_name {
                Some(n) => n.clone(),
                None => self.src.parent().map(dir_name).unwrap_or_default(),
            };
            if name.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "can't infer a model name from {:?}",
                    self.src
                )));
            }
            return Ok(vec![(name, Corpus::from_path(&self.src)?)]);
        }

        if !self.src.is_dir() {
            return Err(Error::MissingFile(self.src.clone()));
        }

        let mut corpora = Vec::new();
        for model_dir in list_dirs(&self.src)? {
            let model = dir_name(&model_dir);
            match Corpus::from_path_optional(&model_dir.join(&self.model_file))? {
                Some(c) => corpora.push((model, c)),
                None => warn!("[{}] no {} found, skipping", model, self.model_file),
            }
        }
        Ok(corpora)
    }

    /// Sample a corpus for a given slice factor, writing one file per sample.
    fn sample_corpus(
        &self,
        model: &str,
        corpus: &Corpus,
        slice_factor: SliceFactor,
    ) -> Result<Vec<PathBuf>, Error> {
        let samples = generate_samples(
            corpus.len(),
            self.nb_samples,
            slice_factor,
            self.seed,
            self.sampling,
        )?;

        let out_dir = sample_dir(&self.dst, model, slice_factor);
        let mut written = Vec::with_capacity(samples.len());
        for (i, sample) in samples.iter().enumerate() {
            let held_out = sample.complement(corpus.len());
            let processed = process_corpus(corpus.lines(), &held_out, self.held_out);

            let path = out_dir.join(format!("sample{}.txt", i + 1));
            debug!(
                "[{}/{}] sample {} (split {}): {} lines, {} word types",
                model,
                slice_factor,
                i + 1,
                sample.split(),
                sample.len(),
                processed.len()
            );
            write_lines(&path, &processed)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// `<dst>/<model>/<slice_factor>`
pub fn sample_dir(dst: &Path, model: &str, slice_factor: SliceFactor) -> PathBuf {
    dst.join(model).join(slice_factor.to_string())
}

impl Pipeline<Vec<PathBuf>> for IncrementalSampling {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn run(&self) -> Result<Vec<PathBuf>, Error> {
        if self.slice_factors.is_empty() {
            return Err(Error::InvalidInput("no slice factor provided".to_string()));
        }

        let corpora = self.corpora()?;
        if corpora.is_empty() {
            warn!("no corpus found in {:?}", self.src);
        }

        let mut written = Vec::new();
        for (model, corpus) in &corpora {
            info!("[{}] {} lines", model, corpus.len());
            for slice_factor in &self.slice_factors {
                let files = self.sample_corpus(model, corpus, *slice_factor)?;
                info!(
                    "[{}/{}] wrote {} samples",
                    model,
                    slice_factor,
                    files.len()
                );
                written.extend(files);
            }
        }
        Ok(written)
    }
}
