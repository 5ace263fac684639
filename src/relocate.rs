//! Moving one named import from its source module into the destination module
//!
//! The rewrite works on the text of a single file. For each rule, the first
//! import of the source module is checked for the type name; if present the
//! name is taken out of that statement (dropping the statement when nothing is
//! left) and added to the destination import, which is created after the
//! client directive when the file has none.

use serde::Serialize;
use tracing::debug;

use crate::directive::insert_after_directive;
use crate::imports::{find_import, render_import, scan_imports};
use crate::relocation::RelocationMap;

/// What a single relocation attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Source module absent or does not list the type.
    Unchanged,
    /// Type moved to the destination module.
    Moved,
    /// The type is also imported from an unrelated module; nothing was touched.
    Conflict { other_module: String },
}

/// Result of [`relocate`]: the (possibly rewritten) text and what happened.
#[derive(Debug, Clone)]
pub struct Relocation {
    pub content: String,
    pub outcome: Outcome,
}

impl Relocation {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            outcome: Outcome::Unchanged,
        }
    }

    pub fn changed(&self) -> bool {
        self.outcome == Outcome::Moved
    }
}

/// A type left in place because another module also provides that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub type_name: String,
    pub source_module: String,
    pub other_module: String,
}

/// Move `type_name` from the first import of `source_module` to the import of
/// `destination`.
pub fn relocate(
    content: &str,
    type_name: &str,
    source_module: &str,
    destination: &str,
) -> Relocation {
    let Some(source) = find_import(content, source_module) else {
        return Relocation::unchanged(content);
    };
    if !source.contains(type_name) {
        return Relocation::unchanged(content);
    }

    if let Some(other) = scan_imports(content).into_iter().find(|stmt| {
        stmt.module != source_module && stmt.module != destination && stmt.contains(type_name)
    }) {
        return Relocation {
            content: content.to_string(),
            outcome: Outcome::Conflict {
                other_module: other.module,
            },
        };
    }

    let mut remaining = source.names.clone();
    if let Some(pos) = remaining.iter().position(|n| n == type_name) {
        remaining.remove(pos);
    }
    let replacement = if remaining.is_empty() {
        String::new()
    } else {
        render_import(&remaining, source_module)
    };

    let mut updated = String::with_capacity(content.len() + type_name.len() + 32);
    updated.push_str(&content[..source.span.start]);
    updated.push_str(&replacement);
    updated.push_str(&content[source.span.end..]);

    let updated = match find_import(&updated, destination) {
        Some(dest) if dest.contains(type_name) => updated,
        Some(mut dest) => {
            dest.names.push(type_name.to_string());
            let mut out = String::with_capacity(updated.len() + type_name.len() + 2);
            out.push_str(&updated[..dest.span.start]);
            out.push_str(&dest.render());
            out.push_str(&updated[dest.span.end..]);
            out
        }
        None => insert_after_directive(&updated, &render_import(&[type_name], destination)),
    };

    Relocation {
        content: updated,
        outcome: Outcome::Moved,
    }
}

/// All relocations applied to one file's text.
#[derive(Debug, Clone, Default)]
pub struct FileRelocation {
    pub content: String,
    /// Type names moved into the destination, in map order.
    pub moved: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

impl FileRelocation {
    pub fn changed(&self) -> bool {
        !self.moved.is_empty()
    }
}

/// Apply every rule of `map`, each against the text produced by the previous
/// one.
pub fn relocate_all(content: &str, map: &RelocationMap) -> FileRelocation {
    let mut result = FileRelocation {
        content: content.to_string(),
        ..Default::default()
    };

    for rule in map.rules() {
        let relocation = relocate(
            &result.content,
            &rule.type_name,
            &rule.source_module,
            map.destination(),
        );
        match relocation.outcome {
            Outcome::Unchanged => {}
            Outcome::Moved => {
                debug!(type_name = %rule.type_name, from = %rule.source_module, "moved import");
                result.content = relocation.content;
                result.moved.push(rule.type_name.clone());
            }
            Outcome::Conflict { other_module } => {
                result.conflicts.push(Conflict {
                    type_name: rule.type_name.clone(),
                    source_module: rule.source_module.clone(),
                    other_module,
                });
            }
        }
    }

    result
}
