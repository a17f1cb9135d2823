/*!
# Text writing

Outputs are written whole-file: lines are newline-joined, without a trailing newline.
!*/
mod textwriter;
pub use textwriter::write_lines;
