/*! Corpus reader

A [Corpus] is an ordered, immutable list of lines loaded from a text file.

Segmentation outputs are laid out as `<root>/<condition>/<seed>/Model.txt` for seeds `1..=5`.
[SegmentedVariants] holds every seed of a condition, with absent files kept as [None]
so that callers decide how to treat missing data.
!*/
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;

use super::textreader::read_lines_optional;

/// Seeds (runs) produced for each segmentation condition.
pub const SEEDS: std::ops::RangeInclusive<u32> = 1..=5;

/// Default name of the segmented corpus inside a seed folder.
pub const MODEL_FILE: &str = "Model.txt";

/// Condition folders that don't follow the seed layout and are skipped by default.
pub const SPECIAL_FOLDERS: [&str; 7] = [
    "AGGrammars",
    "TP_Absolute_BTP",
    "TP_Absolute_FTP",
    "TP_Absolute_MI",
    "TP_Relative_BTP",
    "TP_Relative_FTP",
    "TP_Relative_MI",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    lines: Vec<String>,
}

impl Corpus {
    /// Load a corpus, failing with [Error::MissingFile] if `src` does not exist.
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        match Self::from_path_optional(src)? {
            Some(c) => Ok(c),
            None => Err(Error::MissingFile(src.to_path_buf())),
        }
    }

    /// Load a corpus, returning [None] if `src` does not exist.
    pub fn from_path_optional(src: &Path) -> Result<Option<Self>, Error> {
        debug!("loading corpus {:?}", src);
        Ok(read_lines_optional(src)?.map(|lines| Self { lines }))
    }

    /// Build an in-memory corpus. Blank lines are filtered out like when loading from disk.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(Into::into)
                .filter(|l: &String| !l.trim().is_empty())
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// All seeds of a segmentation condition.
#[derive(Debug, Clone)]
pub struct SegmentedVariants {
    condition: String,
    variants: Vec<(u32, Option<Corpus>)>,
}

impl SegmentedVariants {
    pub fn new(condition: String, variants: Vec<(u32, Option<Corpus>)>) -> Self {
        Self {
            condition,
            variants,
        }
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Variant key, e.g. `AGSimple3`.
    pub fn key(&self, seed: u32) -> String {
        format!("{}{}", self.condition, seed)
    }

    pub fn get(&self, seed: u32) -> Option<&Corpus> {
        self.variants
            .iter()
            .find(|(s, _)| *s == seed)
            .and_then(|(_, c)| c.as_ref())
    }

    /// Iterate over present variants only.
    pub fn present(&self) -> impl Iterator<Item = (u32, &Corpus)> {
        self.variants
            .iter()
            .filter_map(|(s, c)| c.as_ref().map(|c| (*s, c)))
    }

    /// Seeds whose file was absent.
    pub fn missing(&self) -> Vec<u32> {
        self.variants
            .iter()
            .filter(|(_, c)| c.is_none())
            .map(|(s, _)| *s)
            .collect()
    }
}

/// Name of a directory, used as condition/model name.
pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read `<condition_dir>/<seed>/Model.txt` for every seed.
///
/// Missing files are *not* errors: they are kept as [None] and a warning is emitted.
pub fn load_segmented_files(condition_dir: &Path) -> Result<SegmentedVariants, Error> {
    let condition = dir_name(condition_dir);

    let mut variants = Vec::with_capacity(5);
    for seed in SEEDS {
        let path = condition_dir.join(seed.to_string()).join(MODEL_FILE);
        let corpus = Corpus::from_path_optional(&path)?;
        if corpus.is_none() {
            warn!("[{}{}] no file at {:?}", condition, seed, path);
        }
        variants.push((seed, corpus));
    }

    Ok(SegmentedVariants::new(condition, variants))
}

/// List subdirectories of `root`, sorted by name.
pub fn list_dirs(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Paths matching `pattern` under `root`, sorted.
///
/// `root` is matched literally, so folders such as `run[1]` are supported.
pub fn glob_under(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let root_str = root
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {:?}", root)))?;
    let full = Path::new(&glob::Pattern::escape(root_str)).join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| Error::Custom(format!("non UTF-8 pattern: {:?}", full)))?;

    let mut paths = glob::glob(full)?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn segmented_files() {
        let root = tempfile::tempdir().unwrap();
        let cond = root.path().join("AGSimple");
        for seed in [1, 2, 4] {
            let d = cond.join(seed.to_string());
            fs::create_dir_all(&d).unwrap();
            fs::write(d.join(MODEL_FILE), format!("yu want\n\nit {}\n", seed)).unwrap();
        }

        let variants = load_segmented_files(&cond).unwrap();
        assert_eq!(variants.condition(), "AGSimple");
        assert_eq!(variants.key(2), "AGSimple2");
        assert_eq!(variants.missing(), vec![3, 5]);
        assert_eq!(variants.present().count(), 3);
        assert_eq!(
            variants.get(4).unwrap().lines(),
            &["yu want".to_string(), "it 4".to_string()]
        );
        assert!(variants.get(3).is_none());
    }

    #[test]
    fn missing_required() {
        let root = tempfile::tempdir().unwrap();
        let res = Corpus::from_path(&root.path().join("nope.txt"));
        assert!(matches!(res, Err(Error::MissingFile(_))));
    }

    #[test]
    fn from_lines_filters_blank() {
        let c = Corpus::from_lines(vec!["a b", " ", "", "c"]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn dirs_sorted() {
        let root = tempfile::tempdir().unwrap();
        for d in ["b", "a", "c"] {
            fs::create_dir(root.path().join(d)).unwrap();
        }
        fs::write(root.path().join("file.txt"), "").unwrap();
        let dirs: Vec<String> = list_dirs(root.path())
            .unwrap()
            .iter()
            .map(|p| dir_name(p))
            .collect();
        assert_eq!(dirs, vec!["a", "b", "c"]);
    }

    #[test]
    fn glob_literal_root() {
        let root = tempfile::tempdir().unwrap();
        let d = root.path().join("run[1]*");
        fs::create_dir_all(d.join("sub")).unwrap();
        fs::write(d.join("b.txt"), "b").unwrap();
        fs::write(d.join("a.txt"), "a").unwrap();
        fs::write(d.join("sub").join("c.txt"), "c").unwrap();
        // would match if the root were a pattern
        fs::create_dir_all(root.path().join("run1x")).unwrap();
        fs::write(root.path().join("run1x").join("z.txt"), "z").unwrap();

        assert_eq!(
            glob_under(&d, "*.txt").unwrap(),
            vec![d.join("a.txt"), d.join("b.txt")]
        );
        assert_eq!(glob_under(&d, "**/*.txt").unwrap().len(), 3);
    }
}
