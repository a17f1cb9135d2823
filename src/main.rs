//! # Protolex
//!
//! Corpus preparation tools for word segmentation experiments:
//! formatting segmentation outputs, consistency checks, incremental exposure sampling,
//! cross-validation folds and batch scoring with an external phonotactic scorer.
//!
//! ## Getting started
//!
//! ```sh
//! protolex 0.1.0
//! corpus preparation tools for word segmentation experiments.
//!
//! USAGE:
//!     protolex <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     check     Check consistency of segmentation outputs
//!     clean     Remove unseen cases from scored CSV files
//!     folds     Split a corpus into cross-validation folds
//!     format    Format segmentation outputs into word type lists
//!     help      Prints this message or the help of the given subcommand(s)
//!     merge     Rewrite a symbol and deduplicate formatted corpora
//!     sample    Generate incremental exposure samples
//!     score     Run the external scorer on a corpus tree
//!     stats     Compute sample size statistics
//! ```
//!
//! Logging is configured with `RUST_LOG` (e.g. `RUST_LOG=info protolex sample ...`).
use std::fs::File;
use std::sync::Arc;

use protolex::check::{self, CheckOptions};
use protolex::error::Error;
use protolex::pipelines::{FormatCorpora, IncrementalSampling, Pipeline};
use protolex::processing::{clean, folds, merge, stats::SizeTable};
use protolex::sampling::SamplingPolicy;
use protolex::scoring::{self, ExternalScorer};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Protolex::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Protolex::Sample(s) => {
            let seed = if s.no_seed { None } else { Some(s.seed) };
            let sampling = if s.strict {
                SamplingPolicy::Strict
            } else {
                SamplingPolicy::PerSplit
            };
            let p = IncrementalSampling::new(s.src, s.dst, s.slice_factors, s.count)
                .seed(seed)
                .sampling(sampling)
                .held_out(s.held_out)
                .model_file(s.model_file)
                .model_name(s.model_name);
            let written = p.run()?;
            info!("[{}] wrote {} samples", p.name(), written.len());
        }

        cli::Protolex::Format(f) => {
            let mut p = FormatCorpora::new(f.src, f.dst);
            if let Some(skip) = f.skip {
                p = p.skip(skip);
            }
            let written = p.run()?;
            info!("[{}] formatted {} corpora", p.name(), written.len());
        }

        cli::Protolex::Check(c) => {
            let defaults = CheckOptions::default();
            let options = CheckOptions {
                baseline: c.baseline,
                baseline_seed: c.baseline_seed,
                markers: c.markers.unwrap_or(defaults.markers),
                skip: c.skip.unwrap_or(defaults.skip),
            };
            let summaries = check::check_all(&c.src, &options)?;

            for (condition, summary) in &summaries {
                println!("{}: {:?}", condition, summary);
            }
            if let Some(report) = c.report {
                check::write_report(&report, &summaries)?;
            }
            let failed = summaries.values().filter(|s| !s.is_ok()).count();
            if failed > 0 {
                warn!("{}/{} conditions failed checks", failed, summaries.len());
            }
        }

        cli::Protolex::Merge(m) => {
            let n = merge::merge(&m.src, &m.dst, &m.from, &m.to)?;
            info!("All {} files processed. Merged corpus saved in {:?}", n, m.dst);
        }

        cli::Protolex::Folds(f) => {
            folds::create_folds(&f.src, &f.dst, f.n_folds, Some(f.seed))?;
        }

        cli::Protolex::Clean(c) => {
            let written = clean::clean_csvs(&c.src, &c.dst)?;
            info!("cleaned {} files", written.len());
        }

        cli::Protolex::Stats(s) => {
            let table = SizeTable::from_dir(&s.src)?;
            if table.is_empty() {
                warn!("no samples found in {:?}", s.src);
            }
            table.write_csv(std::io::stdout())?;
            table.write_csv(File::create(&s.dst)?)?;
        }

        cli::Protolex::Score(s) => {
            let tasks = scoring::enumerate_tasks(&s.train, &s.stimuli, &s.dst)?;
            let scorer = Arc::new(ExternalScorer::new(s.scorer, s.scorer_args));
            let report = scoring::dispatch(tasks, scorer, s.n_threads.unwrap_or(0))?;

            // write eventual scoring errors
            for (task, e) in &report.failed {
                error!("Error during scoring {}:\n {}", task, e);
            }
            info!(
                "{}/{} tasks succeeded",
                report.succeeded.len(),
                report.total()
            );
        }
    };
    Ok(())
}
