//! Reading and writing source files in place
//!
//! Unlike a best-effort reader, both directions fail loudly: a file that is not
//! UTF-8 or cannot be written back stops the run.

use std::fs;
use std::path::Path;

use crate::error::{Result, TypemoveError};

/// Extensions of typed source and typed component files.
pub const TYPED_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Whether a path names a typed source file (`.ts` or `.tsx`, case-sensitive).
pub fn is_typed_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TYPED_EXTENSIONS.contains(&ext))
}

/// Read a whole file as UTF-8 text.
pub fn read_source_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| TypemoveError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| TypemoveError::Decode {
        path: path.to_path_buf(),
    })
}

/// Overwrite a file with new text. No backup is kept.
pub fn write_source_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| TypemoveError::io(path, e))
}
