/*! Line reading facilities

[LineReader] iterates over the non-blank lines of a text source, with line endings stripped.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::Path,
};

use crate::error::Error;

/// Reader that yields the non-blank lines of a source.
///
/// A line is considered blank if it only contains whitespace.
/// Kept lines are returned as-is, minus the trailing `\n`/`\r\n`.
#[derive(Debug)]
pub struct LineReader<T> {
    lines: Lines<BufReader<T>>,
}

impl LineReader<File> {
    pub fn new(src: &Path) -> Result<Self, Error> {
        let handler = File::open(src)?;
        Ok(Self {
            lines: BufReader::new(handler).lines(),
        })
    }
}

impl<T: Read> LineReader<T> {
    /// Build a reader on an arbitrary source.
    pub fn from_reader(reader: T) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<T> Iterator for LineReader<T>
where
    T: Read,
{
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match line {
                Ok(mut l) => {
                    if l.trim().is_empty() {
                        continue;
                    }
                    // lone \r at end of input, \r\n is already stripped by lines()
                    if l.ends_with('\r') {
                        l.pop();
                    }
                    return Some(Ok(l));
                }
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }
        None
    }
}

/// Read every non-blank line of `src`.
pub fn read_lines(src: &Path) -> Result<Vec<String>, Error> {
    LineReader::new(src)?.collect()
}

/// Read every non-blank line of `src`, returning [None] if the file does not exist.
///
/// Other IO errors are still propagated.
pub fn read_lines_optional(src: &Path) -> Result<Option<Vec<String>>, Error> {
    match LineReader::new(src) {
        Ok(reader) => reader.collect::<Result<Vec<_>, _>>().map(Some),
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
