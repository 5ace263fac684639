//! Directive markers that must stay the first statement of a file

use std::ops::Range;

/// Client directive spellings, searched in this order.
const DIRECTIVE_MARKERS: &[&str] = &["'use client'", "\"use client\""];

/// Byte range of the directive literal (quotes included), if the file has one.
///
/// The search is a plain substring search; the first spelling that occurs
/// anywhere wins.
pub fn find_directive(content: &str) -> Option<Range<usize>> {
    DIRECTIVE_MARKERS.iter().find_map(|marker| {
        content
            .find(marker)
            .map(|start| start..start + marker.len())
    })
}

/// Insert an import statement as a new line directly after the directive
/// (and its `;`), or as the very first line when there is no directive.
pub fn insert_after_directive(content: &str, statement: &str) -> String {
    let mut out = String::with_capacity(content.len() + statement.len() + 2);

    match find_directive(content) {
        Some(range) => {
            let rest = &content[range.end..];
            let semicolon = rest.len() - rest.trim_start_matches([' ', '\t']).len();
            let offset = if rest[semicolon..].starts_with(';') {
                range.end + semicolon + 1
            } else {
                range.end
            };
            out.push_str(&content[..offset]);
            out.push_str(line_ending(&content[offset..]));
            out.push_str(statement);
            out.push_str(&content[offset..]);
        }
        None => {
            out.push_str(statement);
            out.push_str(line_ending(content));
            out.push_str(content);
        }
    }

    out
}

/// Line ending of the first line break in `text`, `\n` when there is none.
fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(pos) if text[..pos].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
