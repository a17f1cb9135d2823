//! Consistency checks between segmentation conditions.
//!
//! Every condition segments the same corpus, so once segmentation is removed,
//! all of its seeds (and all conditions) must contain the same utterances.
//! We also check that the expected phoneme symbols are present.
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;

use crate::error::Error;
use crate::io::reader::{
    corpus::dir_name, list_dirs, load_segmented_files, Corpus, SegmentedVariants, MODEL_FILE,
};

/// Number of differing elements shown on a mismatch.
const SHOWN_DIFFS: usize = 10;

/// Check results for a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub symbols_ok: bool,
    pub local_match: bool,
    pub global_match: bool,
    /// Seeds with no `Model.txt`.
    pub missing: Vec<u32>,
}

impl CheckSummary {
    pub fn is_ok(&self) -> bool {
        self.symbols_ok && self.local_match && self.global_match
    }
}

/// Checker parameters.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Condition providing the reference corpus.
    pub baseline: String,
    pub baseline_seed: u32,
    /// Symbols that must appear in every variant.
    pub markers: Vec<String>,
    /// Folders that are not checked.
    pub skip: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            baseline: "AGSimple".to_string(),
            baseline_seed: 1,
            markers: vec!["^".to_string(), "x".to_string()],
            skip: crate::io::reader::SPECIAL_FOLDERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Remove whitespace from each line, collecting them into a set.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> HashSet<String> {
    lines
        .iter()
        .map(|l| l.as_ref().split_whitespace().collect::<String>())
        .collect()
}

/// Log at most [SHOWN_DIFFS] elements of a difference, sorted.
fn show_diff<'a>(label: &str, key: &str, diff: impl Iterator<Item = &'a String>) {
    let shown: Vec<&String> = diff.sorted().take(SHOWN_DIFFS).collect();
    if !shown.is_empty() {
        warn!("   {} {} (vs global): {:?}", label, key, shown);
    }
}

/// Check the variants of a condition against each other and against `reference`.
///
/// A condition with missing seeds fails every check.
pub fn check_corpora(
    variants: &SegmentedVariants,
    reference: &HashSet<String>,
    markers: &[String],
) -> CheckSummary {
    let condition = variants.condition();
    let missing = variants.missing();
    let mut summary = CheckSummary {
        symbols_ok: true,
        local_match: true,
        global_match: true,
        missing: missing.clone(),
    };

    for seed in &missing {
        warn!("Missing variant {}", variants.key(*seed));
    }

    // symbols
    for (seed, corpus) in variants.present() {
        let joined = corpus.lines().join(" ");
        let absent: Vec<&String> = markers
            .iter()
            .filter(|m| !joined.contains(m.as_str()))
            .collect();
        if !absent.is_empty() {
            warn!("Missing symbols {:?} in {}", absent, variants.key(seed));
            summary.symbols_ok = false;
        }
    }

    let sets: Vec<(u32, HashSet<String>)> = variants
        .present()
        .map(|(seed, corpus)| (seed, normalize_lines(corpus.lines())))
        .collect();

    // local: every variant matches the first one
    if let Some((first_seed, first)) = sets.first() {
        for (seed, set) in &sets[1..] {
            if set != first {
                warn!(
                    "{} differs from {} in {}",
                    variants.key(*seed),
                    variants.key(*first_seed),
                    condition
                );
                summary.local_match = false;
            }
        }
    }

    // global: every variant matches the reference corpus
    for (seed, set) in &sets {
        if set != reference {
            let key = variants.key(*seed);
            warn!("[{}] {} does not match global reference corpus", condition, key);
            show_diff("Extra in", &key, set.difference(reference));
            show_diff("Missing from", &key, reference.difference(set));
            summary.global_match = false;
        }
    }

    if !missing.is_empty() || sets.is_empty() {
        summary.symbols_ok = false;
        summary.local_match = false;
        summary.global_match = false;
    }

    summary
}

/// Check every condition of `root` against the baseline corpus.
///
/// Mismatches do not stop the check. Fails only if the baseline is missing or on IO errors.
pub fn check_all(
    root: &Path,
    options: &CheckOptions,
) -> Result<BTreeMap<String, CheckSummary>, Error> {
    let baseline_path = root
        .join(&options.baseline)
        .join(options.baseline_seed.to_string())
        .join(MODEL_FILE);
    let reference = normalize_lines(Corpus::from_path(&baseline_path)?.lines());
    info!(
        "reference corpus {:?}: {} distinct utterances",
        baseline_path,
        reference.len()
    );

    let mut summaries = BTreeMap::new();
    for condition_dir in list_dirs(root)? {
        let condition = dir_name(&condition_dir);
        if options.skip.contains(&condition) {
            info!("Skipping {} (special folder)", condition);
            continue;
        }

        let variants = load_segmented_files(&condition_dir)?;
        let summary = check_corpora(&variants, &reference, &options.markers);
        summaries.insert(condition, summary);
    }

    info!("=== Summary across corpora ===");
    for (condition, summary) in &summaries {
        info!("{}: {:?}", condition, summary);
    }

    Ok(summaries)
}

/// Write summaries as pretty JSON.
pub fn write_report(dst: &Path, summaries: &BTreeMap<String, CheckSummary>) -> Result<(), Error> {
    let f = std::fs::File::create(dst)?;
    serde_json::to_writer_pretty(f, summaries)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_variant(root: &Path, condition: &str, seed: u32, content: &str) {
        let d = root.join(condition).join(seed.to_string());
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join(MODEL_FILE), content).unwrap();
    }

    fn markers() -> Vec<String> {
        CheckOptions::default().markers
    }

    #[test]
    fn normalization() {
        let set = normalize_lines(&["b ^ k s", "b^ks", " i t "]);
        let expected: HashSet<String> = ["b^ks", "it"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn all_good() {
        let variants = SegmentedVariants::new(
            "TP".to_string(),
            (1..=5)
                .map(|s| (s, Some(Corpus::from_lines(vec!["b^ks", "si x"]))))
                .collect(),
        );
        let reference = normalize_lines(&["b ^ k s", "six"]);
        let summary = check_corpora(&variants, &reference, &markers());
        assert!(summary.is_ok());
        assert!(summary.missing.is_empty());
    }

    #[test]
    fn local_and_global_mismatch() {
        let mut v: Vec<(u32, Option<Corpus>)> = (1..=4)
            .map(|s| (s, Some(Corpus::from_lines(vec!["b^ks", "six"]))))
            .collect();
        v.push((5, Some(Corpus::from_lines(vec!["b^ks", "sax"]))));
        let variants = SegmentedVariants::new("AG".to_string(), v);

        let reference = normalize_lines(&["b^ks", "six"]);
        let summary = check_corpora(&variants, &reference, &markers());
        assert!(summary.symbols_ok);
        assert!(!summary.local_match);
        assert!(!summary.global_match);
    }

    #[test]
    fn missing_symbol() {
        let variants = SegmentedVariants::new(
            "AG".to_string(),
            (1..=5)
                .map(|s| (s, Some(Corpus::from_lines(vec!["b^ks"]))))
                .collect(),
        );
        let reference = normalize_lines(&["b^ks"]);
        let summary = check_corpora(&variants, &reference, &markers());
        assert!(!summary.symbols_ok);
        assert!(summary.local_match);
        assert!(summary.global_match);
    }

    #[test]
    fn missing_seed_fails() {
        let variants = SegmentedVariants::new(
            "AG".to_string(),
            (1..=5)
                .map(|s| {
                    let c = if s == 3 {
                        None
                    } else {
                        Some(Corpus::from_lines(vec!["b^ks six"]))
                    };
                    (s, c)
                })
                .collect(),
        );
        let reference = normalize_lines(&["b^ks six"]);
        let summary = check_corpora(&variants, &reference, &markers());
        assert_eq!(summary.missing, vec![3]);
        assert!(!summary.is_ok());
    }

    #[test]
    fn whole_tree() {
        let root = tempfile::tempdir().unwrap();
        for seed in 1..=5 {
            write_variant(root.path(), "AGSimple", seed, "b^ks\nsi x\n");
            write_variant(root.path(), "TP_FTP", seed, "b ^ k s\nsix\n");
            write_variant(root.path(), "TP_Relative_MI", seed, "whatever");
        }
        write_variant(root.path(), "Broken", 1, "b^ks\n");

        let summaries = check_all(root.path(), &CheckOptions::default()).unwrap();
        assert_eq!(
            summaries.keys().collect::<Vec<_>>(),
            vec!["AGSimple", "Broken", "TP_FTP"]
        );
        assert!(summaries["AGSimple"].is_ok());
        assert!(summaries["TP_FTP"].is_ok());
        assert!(!summaries["Broken"].is_ok());
        assert_eq!(summaries["Broken"].missing, vec![2, 3, 4, 5]);

        let report = root.path().join("report.json");
        write_report(&report, &summaries).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(parsed["TP_FTP"]["global_match"], serde_json::Value::Bool(true));
    }

    #[test]
    fn no_baseline() {
        let root = tempfile::tempdir().unwrap();
        write_variant(root.path(), "TP", 1, "b^ks");
        let res = check_all(root.path(), &CheckOptions::default());
        assert!(matches!(res, Err(Error::MissingFile(_))));
    }
}
