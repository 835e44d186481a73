//! Text helpers for turning attribute text into HTML.
//!
//! Comment text may already contain markup (`<DL>`, `&lt;`), so prose is
//! passed through; only prototypes and keywords are escaped.

use regex::Regex;
use std::sync::LazyLock;

/// A blank line (possibly holding only whitespace) between paragraphs.
static RE_PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*(\r?\n[ \t]*)+").unwrap());

/// Characters that are not safe inside an HTML fragment identifier.
static RE_ANCHOR_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_~.-]").unwrap());

/// Escape text for literal display (prototypes, keywords, names).
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Prose formatting: blank lines become paragraph breaks, markup is kept.
pub fn smart_format(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .split(text.trim())
        .collect::<Vec<_>>()
        .join("\n<p>\n")
}

/// Fragment identifier for a link name (operators need it).
///
/// `operator==` → `operator_3d_3d`; plain identifiers are unchanged.
pub fn anchor(link_name: &str) -> String {
    RE_ANCHOR_UNSAFE
        .replace_all(link_name, |caps: &regex::Captures| {
            caps[0]
                .bytes()
                .map(|b| format!("_{:x}", b))
                .collect::<String>()
        })
        .into_owned()
}

/// Output file for a class page.
pub fn class_file_name(class: &str) -> String {
    format!("{}.html", anchor(class))
}
