/*!
# IO utilities

Corpus loading and whole-file writing.
!*/
pub mod reader;
pub mod writer;

pub use reader::Corpus;
pub use writer::write_lines;
