//! Named import statements in TypeScript/JavaScript source text
//!
//! Statements are recognised textually: anything shaped like
//! `import { A, B } from "module"` counts, wherever it appears. No syntax tree
//! is built, so imports inside comments or strings are matched too.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Named import with an optional trailing semicolon.
static TS_NAMED_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+\{([^}]+)\}\s+from\s+["']([^"']+)["'](?:[ \t]*;)?"#)
        .expect("TS_NAMED_IMPORT regex is invalid")
});

/// A single `import { ... } from "..."` statement found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Imported names in source order, whitespace-trimmed.
    pub names: Vec<String>,
    /// Module path without quotes.
    pub module: String,
    /// Byte range of the whole statement, including a trailing `;` if present.
    pub span: Range<usize>,
}

impl ImportStatement {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        let names = parse_names(caps.get(1)?.as_str());
        let module = caps.get(2)?.as_str().to_string();
        Some(Self {
            names,
            module,
            span: whole.range(),
        })
    }

    /// Whether `name` is imported as a whole token.
    ///
    /// `ProductList` does not contain `Product`, and neither does
    /// `Product as Item`.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Render the statement in canonical form.
    pub fn render(&self) -> String {
        render_import(&self.names, &self.module)
    }
}

/// Split an import list into trimmed names, dropping empty tokens left by a
/// trailing comma.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonical form of a named import: double-quoted module, trailing `;`.
pub fn render_import<S: AsRef<str>>(names: &[S], module: &str) -> String {
    let list = names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
    format!("import {{ {} }} from \"{}\";", list, module)
}

/// Every named import statement in `content`, in source order.
pub fn scan_imports(content: &str) -> Vec<ImportStatement> {
    TS_NAMED_IMPORT
        .captures_iter(content)
        .filter_map(|caps| ImportStatement::from_captures(&caps))
        .collect()
}

/// First named import of `module`, matched exactly against the quoted path.
///
/// Later imports of the same module are never returned.
pub fn find_import(content: &str, module: &str) -> Option<ImportStatement> {
    TS_NAMED_IMPORT
        .captures_iter(content)
        .filter_map(|caps| ImportStatement::from_captures(&caps))
        .find(|stmt| stmt.module == module)
}
