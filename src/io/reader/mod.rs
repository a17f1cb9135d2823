/*! Corpus reading utilities

Text files are read line by line, dropping blank lines. Absent optional inputs are reported as [None].
!*/
pub mod corpus;
mod textreader;

pub use corpus::{
    glob_under, list_dirs, load_segmented_files, Corpus, SegmentedVariants, MODEL_FILE, SEEDS, SPECIAL_FOLDERS,
};
pub use textreader::{read_lines, read_lines_optional, LineReader};
