//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use protolex::processing::HeldOutPolicy;
use protolex::sampling::SliceFactor;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "protolex",
    about = "corpus preparation tools for word segmentation experiments."
)]
/// Holds every command that is callable by the `protolex` command.
pub enum Protolex {
    #[structopt(about = "Generate incremental exposure samples")]
    Sample(Sample),
    #[structopt(about = "Format segmentation outputs into word type lists")]
    Format(Format),
    #[structopt(about = "Check consistency of segmentation outputs")]
    Check(Check),
    #[structopt(about = "Rewrite a symbol and deduplicate formatted corpora")]
    Merge(Merge),
    #[structopt(about = "Split a corpus into cross-validation folds")]
    Folds(Folds),
    #[structopt(about = "Remove unseen cases from scored CSV files")]
    Clean(Clean),
    #[structopt(about = "Compute sample size statistics")]
    Stats(Stats),
    #[structopt(about = "Run the external scorer on a corpus tree")]
    Score(Score),
}

#[derive(Debug, StructOpt)]
/// Sample command and parameters.
///
/// ```sh
/// protolex sample -f 2,4,8,1.01625 -k 8 RS1_seg_outputs incremental_corpora
/// ```
pub struct Sample {
    #[structopt(
        parse(from_os_str),
        help = "model folders (each containing Model.txt) or a single corpus file"
    )]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "samples destination")]
    pub dst: PathBuf,
    #[structopt(
        short = "f",
        long = "slice-factors",
        help = "comma-separated slice factors (> 1.0), one output folder each",
        required = true,
        use_delimiter = true,
        require_delimiter = true
    )]
    pub slice_factors: Vec<SliceFactor>,
    #[structopt(short = "k", long = "count", help = "number of samples", default_value = "8")]
    pub count: usize,
    #[structopt(long = "seed", help = "random seed", default_value = "42")]
    pub seed: u64,
    #[structopt(long = "no-seed", help = "use system entropy instead of --seed")]
    pub no_seed: bool,
    #[structopt(
        long = "strict",
        help = "require every sample to be disjoint (fails if infeasible)"
    )]
    pub strict: bool,
    #[structopt(
        long = "held-out",
        help = "what to do with unsampled lines: drop or unsegmented",
        default_value = "drop"
    )]
    pub held_out: HeldOutPolicy,
    #[structopt(long = "model-file", help = "corpus file name", default_value = "Model.txt")]
    pub model_file: String,
    #[structopt(long = "model-name", help = "model name when src is a file")]
    pub model_name: Option<String>,
}

#[derive(Debug, StructOpt)]
pub struct Format {
    #[structopt(parse(from_os_str), help = "segmentation outputs (<condition>/<seed>/Model.txt)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "formatted corpora destination")]
    pub dst: PathBuf,
    #[structopt(
        long = "skip",
        help = "condition folders to skip. Defaults to AGGrammars and TP_{Absolute,Relative}_{BTP,FTP,MI}"
    )]
    pub skip: Option<Vec<String>>,
}

#[derive(Debug, StructOpt)]
pub struct Check {
    #[structopt(parse(from_os_str), help = "segmentation outputs (<condition>/<seed>/Model.txt)")]
    pub src: PathBuf,
    #[structopt(long = "baseline", help = "reference condition", default_value = "AGSimple")]
    pub baseline: String,
    #[structopt(long = "baseline-seed", help = "reference seed", default_value = "1")]
    pub baseline_seed: u32,
    #[structopt(long = "markers", help = "symbols required in every corpus")]
    pub markers: Option<Vec<String>>,
    #[structopt(long = "skip", help = "condition folders to skip")]
    pub skip: Option<Vec<String>>,
    #[structopt(parse(from_os_str), long = "report", help = "write summary as JSON")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Merge {
    #[structopt(parse(from_os_str), help = "formatted corpora (<model>/*.txt)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "merged corpora destination")]
    pub dst: PathBuf,
    #[structopt(long = "from", help = "symbol to replace", default_value = "x")]
    pub from: String,
    #[structopt(long = "to", help = "replacement", default_value = "^")]
    pub to: String,
}

#[derive(Debug, StructOpt)]
pub struct Folds {
    #[structopt(parse(from_os_str), help = "corpus file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "folds destination")]
    pub dst: PathBuf,
    #[structopt(short = "n", long = "folds", help = "number of folds", default_value = "5")]
    pub n_folds: usize,
    #[structopt(long = "seed", help = "random seed", default_value = "42")]
    pub seed: u64,
}

#[derive(Debug, StructOpt)]
pub struct Clean {
    #[structopt(parse(from_os_str), help = "folder of scored CSV files")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "cleaned files destination")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Stats {
    #[structopt(parse(from_os_str), help = "samples (<model>/<condition>/*.txt)")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "output CSV",
        default_value = "protolex_stats.csv"
    )]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Score {
    #[structopt(parse(from_os_str), help = "training corpora")]
    pub train: PathBuf,
    #[structopt(parse(from_os_str), help = "folder holding <contrast>_stimuli.txt files")]
    pub stimuli: PathBuf,
    #[structopt(parse(from_os_str), help = "scores destination")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "scorer",
        help = "scorer program, called as <scorer> [args] <train> <test> <out>",
        default_value = "ngram_calculator"
    )]
    pub scorer: PathBuf,
    #[structopt(
        long = "scorer-arg",
        help = "extra leading scorer arguments",
        allow_hyphen_values = true
    )]
    pub scorer_args: Vec<String>,
    #[structopt(
        short = "t",
        help = "number of worker threads. Default is one per core."
    )]
    pub n_threads: Option<usize>,
}
