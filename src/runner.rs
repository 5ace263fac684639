//! The relocation run: walk each root, rewrite files, account for changes

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::file_utils::{read_source_text, write_source_text};
use crate::relocate::{Conflict, relocate_all};
use crate::relocation::RelocationMap;
use crate::walker::collect_source_files;

/// Application source tree and shared components tree.
pub const DEFAULT_ROOTS: &[&str] = &["app", "components"];

/// A file whose imports were (or, in a dry run, would be) rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct ModifiedFile {
    pub path: PathBuf,
    pub moved: Vec<String>,
}

/// A relocation skipped in one file because of a name clash.
#[derive(Debug, Clone, Serialize)]
pub struct FileConflict {
    pub path: PathBuf,
    #[serde(flatten)]
    pub conflict: Conflict,
}

/// Totals for one run over all roots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    /// Number of typed source files examined
    pub scanned: usize,
    pub modified: Vec<ModifiedFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<FileConflict>,
}

impl RunSummary {
    pub fn modified_count(&self) -> usize {
        self.modified.len()
    }
}

/// Applies a relocation map to every typed source file under a set of roots.
#[derive(Debug, Clone)]
pub struct Relocator {
    map: RelocationMap,
    dry_run: bool,
}

impl Relocator {
    pub fn new(map: RelocationMap) -> Self {
        Self {
            map,
            dry_run: false,
        }
    }

    /// Compute changes without writing any file.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every root in order. The first read, decode or write failure
    /// ends the run; files already written stay written.
    pub fn process<P: AsRef<Path>>(&self, roots: &[P]) -> Result<RunSummary> {
        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };
        for root in roots {
            self.process_root(root.as_ref(), &mut summary)?;
        }
        Ok(summary)
    }

    /// Process one directory tree, adding to `summary`.
    pub fn process_root(&self, root: &Path, summary: &mut RunSummary) -> Result<()> {
        debug!(root = %root.display(), "scanning");
        for path in collect_source_files(root)? {
            self.process_file(&path, summary)?;
        }
        Ok(())
    }

    /// Relocate imports in a single file. Returns whether it changed.
    pub fn process_file(&self, path: &Path, summary: &mut RunSummary) -> Result<bool> {
        summary.scanned += 1;
        debug!(path = %path.display(), "checking imports");

        let content = read_source_text(path)?;
        let result = relocate_all(&content, &self.map);

        for conflict in result.conflicts {
            warn!(
                path = %path.display(),
                type_name = %conflict.type_name,
                other_module = %conflict.other_module,
                "type is also imported from another module, left in place"
            );
            summary.conflicts.push(FileConflict {
                path: path.to_path_buf(),
                conflict,
            });
        }

        if result.moved.is_empty() {
            return Ok(false);
        }

        if self.dry_run {
            info!(path = %path.display(), moved = ?result.moved, "would update");
        } else {
            write_source_text(path, &result.content)?;
            info!(path = %path.display(), moved = ?result.moved, "updated");
        }

        summary.modified.push(ModifiedFile {
            path: path.to_path_buf(),
            moved: result.moved,
        });
        Ok(true)
    }
}
