//! Whole-file text writer.
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;

/// Write `lines` to `dst`, newline-joined, creating parent folders if needed.
///
/// An existing file is truncated.
pub fn write_lines<S: AsRef<str>>(dst: &Path, lines: &[S]) -> Result<(), Error> {
    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    debug!("writing {} lines to {:?}", lines.len(), dst);
    let mut out = BufWriter::new(File::create(dst)?);
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.write_all(b"\n")?;
        }
        out.write_all(line.as_ref().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
