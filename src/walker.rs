//! Discovery of typed source files under a root directory

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::error::Result;
use crate::file_utils::is_typed_source;

/// Every `.ts`/`.tsx` file below `root`, in sorted order.
///
/// Ignore files and hidden entries are not honoured; symlinks are not
/// followed. A root that is not a directory yields no files.
pub fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        warn!(root = %root.display(), "root is not a directory, skipping");
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && is_typed_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    #[test]
    fn test_collects_nested_typed_files() {
        let tree = TestTree::new();
        tree.add_file("app/page.tsx", "");
        tree.add_file("app/cart/page.tsx", "");
        tree.add_file("app/lib/api.ts", "");
        tree.add_file("app/next.config.js", "");
        tree.add_file("app/styles.css", "");

        let files = collect_source_files(&tree.path().join("app")).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(tree.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["app/cart/page.tsx", "app/lib/api.ts", "app/page.tsx"]);
    }

    #[test]
    fn test_hidden_and_ignored_entries_are_visited() {
        let tree = TestTree::new();
        tree.add_file("app/.gitignore", "generated/\n");
        tree.add_file("app/generated/model.ts", "");
        tree.add_file("app/.hidden/util.ts", "");

        let files = collect_source_files(&tree.path().join("app")).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let tree = TestTree::new();
        let files = collect_source_files(&tree.path().join("components")).unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed() {
        use std::os::unix::fs::symlink;

        let tree = TestTree::new();
        tree.add_file("app/real.ts", "");
        symlink(tree.path().join("app/real.ts"), tree.path().join("app/link.ts")).unwrap();
        symlink(tree.path().join("app"), tree.path().join("app/loop")).unwrap();

        let files = collect_source_files(&tree.path().join("app")).unwrap();
        assert_eq!(files, vec![tree.path().join("app/real.ts")]);
    }
}
