//! Markdown-flavored dialect → canonical `.ndoc` markup.
//!
//! ```text
//! # Math                               [module: Math]
//! Math utilities.                      desc: Math utilities.
//! ## add                         →     [function: add]
//! - **a** (`number`): First operand    param: a (number) - First operand
//! **Returns**: `number` - The sum      return: number - The sum
//! ```
//!
//! Canonical directives pass through untouched, so normalizing already
//! canonical markup is a no-op. A prose line starting with `\\` is a
//! description even when the rest would read as a heading or list item.

use regex::Regex;
use std::sync::LazyLock;

static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*- \*\*(\w+)\*\* \(`(\w+)`\):\s*(.+)$").unwrap());

static RE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\*Returns\*\*:\s*`(\w+)`\s*-\s*(.+)$").unwrap());

/// Line prefixes that already belong to the canonical grammar.
const CANONICAL_PREFIXES: &[&str] = &["[module:", "[function:", "desc:", "param:", "return:"];

/// Prose lines starting with this are taken literally as descriptions.
pub const ESCAPE: char = '\\';

/// Rewrite Markdown-dialect text into canonical markup.
pub fn normalize(input: &str) -> String {
    let lines: Vec<String> = normalize_numbered(input)
        .into_iter()
        .map(|(_, line)| line)
        .collect();
    lines.join("\n").trim().to_string()
}

/// Rewrite Markdown-dialect text, tagging each emitted line with the 1-based
/// source line it came from. Blank lines are kept so headings stay apart.
pub fn normalize_numbered(input: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut emitted = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        normalize_line(line.trim(), &mut emitted);
        out.extend(emitted.drain(..).map(|l| (idx + 1, l)));
    }

    out
}

/// True when any line is already a canonical directive. Such sources are
/// parsed as they are, without the Markdown rewrite.
pub fn is_canonical_source(input: &str) -> bool {
    input.lines().any(|line| is_canonical(line.trim()))
}

fn normalize_line(line: &str, out: &mut Vec<String>) {
    if line.is_empty() {
        out.push(String::new());
        return;
    }

    if let Some(text) = line.strip_prefix(ESCAPE) {
        out.push(format!("desc: {}", text.trim()));
        return;
    }

    if let Some(name) = heading(line, "#") {
        out.push(format!("[module: {}]", name));
        return;
    }

    if let Some(name) = heading(line, "##") {
        out.push(String::new());
        out.push(format!("[function: {}]", name));
        return;
    }

    if let Some(caps) = RE_PARAM.captures(line) {
        out.push(format!("param: {} ({}) - {}", &caps[1], &caps[2], &caps[3]));
        return;
    }

    if let Some(caps) = RE_RETURNS.captures(line) {
        out.push(format!("return: {} - {}", &caps[1], &caps[2]));
        return;
    }

    if is_canonical(line) {
        out.push(line.to_string());
        return;
    }

    if !line.starts_with('-') && !line.starts_with("**Returns**") {
        out.push(format!("desc: {}", line));
        return;
    }

    // Unmatched list items and Returns lines are kept verbatim
    out.push(line.to_string());
}

/// `# NAME` / `## NAME`; a bare `#` / `##` is a heading with an empty name.
fn heading<'a>(line: &'a str, marks: &str) -> Option<&'a str> {
    if line == marks {
        return Some("");
    }
    line.strip_prefix(marks)?.strip_prefix(' ').map(str::trim)
}

pub(crate) fn is_canonical(line: &str) -> bool {
    CANONICAL_PREFIXES.iter().any(|p| line.starts_with(p))
}
