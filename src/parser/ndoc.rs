//! Canonical `.ndoc` parser, written as a fold over trimmed lines.
//!
//! Best-effort: every input produces a Document. Lines that contribute
//! nothing are reported through [`parse_with_diagnostics`] instead of
//! failing the parse.

use crate::model::*;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

/// `NAME (TYPE) - DESC`; the first `-` after the type splits off the description.
static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*\((\w+)\)\s*-\s*(.+)").unwrap());

static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*-\s*(.+)").unwrap());

const MODULE_MARKER: &str = "[module:";
const FUNCTION_MARKER: &str = "[function:";
const DESC: &str = "desc:";
const PARAM: &str = "param:";
const RETURN: &str = "return:";

// -- Diagnostics --------------------------------------------------------------

/// Why a non-empty line contributed nothing to the Document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `param:` / `return:` seen before any `[function: ...]` marker
    NoFunction,
    /// `param:` line not shaped like `NAME (TYPE) - DESC`
    MalformedParam,
    /// `return:` line not shaped like `TYPE - DESC`
    MalformedReturn,
    /// Not a directive at all
    Unrecognized,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoFunction => "no open function",
            SkipReason::MalformedParam => "malformed param",
            SkipReason::MalformedReturn => "malformed return",
            SkipReason::Unrecognized => "unrecognized line",
        };
        f.write_str(text)
    }
}

/// A dropped line, with its 1-based line number in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

// -- Parser state -------------------------------------------------------------

#[derive(Default)]
struct ParseState {
    doc: Document,
    /// Index into `doc.module.functions` of the function being filled
    current: Option<usize>,
    skipped: Vec<Skipped>,
}

fn skipped(line: usize, text: &str, reason: SkipReason) -> Skipped {
    Skipped {
        line,
        text: text.to_string(),
        reason,
    }
}

// -- Public API ---------------------------------------------------------------

/// Parse canonical markup into a Document.
pub fn parse(input: &str) -> Document {
    parse_with_diagnostics(input).0
}

/// Parse canonical markup, also returning every line that was dropped.
pub fn parse_with_diagnostics(input: &str) -> (Document, Vec<Skipped>) {
    parse_numbered(input.lines().enumerate().map(|(idx, line)| (idx + 1, line)))
}

/// Parse lines already tagged with their 1-based source line numbers.
///
/// Used when the lines come out of a rewrite (the Markdown dialect) so that
/// diagnostics still point into the file the author wrote.
pub fn parse_numbered<'a, I>(lines: I) -> (Document, Vec<Skipped>)
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let state = lines
        .into_iter()
        .map(|(number, line)| (number, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .fold(ParseState::default(), |state, (number, line)| {
            process_line(state, number, line)
        });

    (state.doc, state.skipped)
}

// -- Line processing ----------------------------------------------------------

fn process_line(mut s: ParseState, number: usize, line: &str) -> ParseState {
    if line.starts_with(MODULE_MARKER) {
        s.doc.module.name = bracket_content(line, MODULE_MARKER).to_string();
        return s;
    }

    if s.current.is_none() {
        if let Some(text) = line.strip_prefix(DESC) {
            s.doc.module.desc = text.trim().to_string();
            return s;
        }
    }

    if line.starts_with(FUNCTION_MARKER) {
        let name = bracket_content(line, FUNCTION_MARKER);
        s.doc.module.functions.push(FunctionDoc::new(name));
        s.current = Some(s.doc.module.functions.len() - 1);
        return s;
    }

    let Some(idx) = s.current else {
        let reason = if line.starts_with(PARAM) || line.starts_with(RETURN) {
            SkipReason::NoFunction
        } else {
            SkipReason::Unrecognized
        };
        s.skipped.push(skipped(number, line, reason));
        return s;
    };
    let func = &mut s.doc.module.functions[idx];

    if let Some(text) = line.strip_prefix(DESC) {
        func.desc = text.trim().to_string();
    } else if let Some(text) = line.strip_prefix(PARAM) {
        match parse_param(text) {
            Some(param) => func.params.push(param),
            None => s.skipped.push(skipped(number, line, SkipReason::MalformedParam)),
        }
    } else if let Some(text) = line.strip_prefix(RETURN) {
        match parse_return(text) {
            Some(ret) => func.returns = ret,
            None => s.skipped.push(skipped(number, line, SkipReason::MalformedReturn)),
        }
    } else {
        s.skipped.push(skipped(number, line, SkipReason::Unrecognized));
    }

    s
}

/// Slice a `[marker: NAME]` line: everything after the marker and before the
/// final character, trimmed. A missing `]` costs the name its last character.
fn bracket_content<'a>(line: &'a str, marker: &str) -> &'a str {
    let start = marker.len();
    let end = line.char_indices().last().map(|(i, _)| i).unwrap_or(0);
    if start >= end {
        return "";
    }
    line[start..end].trim()
}

fn parse_param(text: &str) -> Option<Param> {
    let caps = RE_PARAM.captures(text)?;
    Some(Param {
        name: caps[1].trim().to_string(),
        ty: caps[2].trim().to_string(),
        desc: caps[3].trim().to_string(),
    })
}

fn parse_return(text: &str) -> Option<Return> {
    let caps = RE_RETURN.captures(text)?;
    Some(Return {
        ty: caps[1].trim().to_string(),
        desc: caps[2].trim().to_string(),
    })
}
