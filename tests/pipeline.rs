use std::fs;
use std::path::Path;
use std::sync::Arc;

use protolex::check::{check_all, CheckOptions};
use protolex::error::Error;
use protolex::pipelines::{FormatCorpora, IncrementalSampling, Pipeline};
use protolex::processing::{clean, stats::SizeTable};
use protolex::sampling::SliceFactor;
use protolex::scoring::{dispatch, enumerate_tasks, Contrast, Scorer, ScoringTask};

const UTTERANCES: [&str; 6] = [
    "yu want tu si D^ bUk",
    "lUk D*z ^ dOgi",
    "WAts D*t",
    "yu want It",
    "bIg dOgi",
    "six",
];

/// Segmentation outputs: the same utterances under different segmentations.
fn segmentation_tree(root: &Path) {
    for (condition, glue) in [("AGSimple", false), ("TP_FTP", true), ("AGGrammars", true)] {
        for seed in 1..=5 {
            let dir = root.join(condition).join(seed.to_string());
            fs::create_dir_all(&dir).unwrap();
            let content: Vec<String> = UTTERANCES
                .iter()
                .map(|u| if glue { u.replace(' ', "") } else { u.to_string() })
                .collect();
            fs::write(dir.join("Model.txt"), content.join("\n")).unwrap();
        }
    }
}

#[test_log::test]
fn format_check_sample_stats() {
    let root = tempfile::tempdir().unwrap();
    let segmented = root.path().join("all_corpora");
    segmentation_tree(&segmented);

    // consistency
    let summaries = check_all(&segmented, &CheckOptions::default()).unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.values().all(|s| s.is_ok()));

    // formatting
    let formatted = root.path().join("formatted");
    let written = FormatCorpora::new(segmented.clone(), formatted.clone())
        .run()
        .unwrap();
    assert_eq!(written.len(), 10);
    let tp = fs::read_to_string(formatted.join("TP_FTP").join("TP_FTP1.txt")).unwrap();
    assert_eq!(tp.lines().next(), Some("y u w a n t t u s i D ^ b U k"));

    // sampling, on the model folders of the first seed
    let models = root.path().join("models");
    for model in ["AGSimple", "TP_FTP"] {
        fs::create_dir_all(models.join(model)).unwrap();
        fs::copy(
            segmented.join(model).join("1").join("Model.txt"),
            models.join(model).join("Model.txt"),
        )
        .unwrap();
    }
    let samples = root.path().join("samples");
    let factors = vec![SliceFactor::new(2.0).unwrap(), SliceFactor::new(3.0).unwrap()];
    let written = IncrementalSampling::new(models, samples.clone(), factors, 4)
        .seed(Some(42))
        .run()
        .unwrap();
    assert_eq!(written.len(), 2 * 2 * 4);

    // every sample of TP_FTP has exactly 3 (resp. 2) lines: one word type per utterance
    let table = SizeTable::from_dir(&samples).unwrap();
    assert_eq!(table.cell("2", "TP_FTP"), "3.00 (0.00)");
    assert_eq!(table.cell("3", "TP_FTP"), "2.00 (0.00)");
    assert_eq!(table.cell("4", "TP_FTP"), "No Data");
}

/// Writes a CSV with an unseen case.
struct CsvScorer;

impl Scorer for CsvScorer {
    fn score(&self, task: &ScoringTask) -> Result<(), Error> {
        if task.test.to_string_lossy().contains("both") {
            return Err(Error::TaskFailure {
                task: task.to_string(),
                reason: "no both contrast today".to_string(),
            });
        }
        fs::write(&task.out, "word,uni_prob\nb a,-2.0\nz z,-inf\n")?;
        Ok(())
    }
}

#[test_log::test]
fn score_and_clean() {
    let root = tempfile::tempdir().unwrap();
    let train = root.path().join("train");
    let stimuli = root.path().join("stimuli");
    let out = root.path().join("scores");

    fs::create_dir_all(train.join("AGSimple")).unwrap();
    fs::write(train.join("AGSimple").join("AGSimple1.txt"), "y u").unwrap();
    fs::write(train.join("AGSimple").join("AGSimple2.txt"), "y u").unwrap();
    fs::create_dir_all(&stimuli).unwrap();
    for c in Contrast::ALL {
        fs::write(c.stimuli_path(&stimuli), "b a").unwrap();
    }

    let tasks = enumerate_tasks(&train, &stimuli, &out).unwrap();
    assert_eq!(tasks.len(), 6);

    let report = dispatch(tasks, Arc::new(CsvScorer), 2).unwrap();
    assert_eq!(report.succeeded.len(), 4);
    assert_eq!(report.failed.len(), 2);

    let cleaned = root.path().join("cleaned");
    let written = clean::clean_csvs(&out.join("AGSimple"), &cleaned).unwrap();
    assert_eq!(written.len(), 4);
    assert_eq!(
        fs::read_to_string(cleaned.join("AGSimple1_bigram_contrast_cleaned.csv")).unwrap(),
        "word,uni_prob\nb a,-2.0\n"
    );
}
