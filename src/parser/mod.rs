//! Parser module: canonical grammar plus the Markdown dialect front end.

pub mod markdown;
pub mod ndoc;

use crate::model::Document;

pub use markdown::{is_canonical_source, normalize};
pub use ndoc::{parse, parse_numbered, parse_with_diagnostics, SkipReason, Skipped};

/// Parse `.ndoc` source written in either dialect.
///
/// A source containing any canonical directive is parsed as it is; anything
/// else goes through [`normalize`] first. This is the one entry point used
/// by build, serve and check.
pub fn load(input: &str) -> Document {
    load_with_diagnostics(input).0
}

/// [`load`], keeping the dropped lines. Line numbers always refer to the
/// source as written, in either dialect.
pub fn load_with_diagnostics(input: &str) -> (Document, Vec<Skipped>) {
    if is_canonical_source(input) {
        return parse_with_diagnostics(input);
    }
    let lines = markdown::normalize_numbered(input);
    parse_numbered(lines.iter().map(|(number, line)| (*number, line.as_str())))
}

/// The canonical form of a source: canonical text unchanged, Markdown
/// rewritten.
pub fn to_canonical(input: &str) -> String {
    if is_canonical_source(input) {
        input.to_string()
    } else {
        normalize(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_dialects_load_to_the_same_document() {
        let canonical = "[module: Math]\ndesc: Math utilities.\n[function: add]\nparam: a (number) - First operand\nreturn: number - The sum";
        let markdown = "# Math\nMath utilities.\n## add\n- **a** (`number`): First operand\n**Returns**: `number` - The sum";
        assert_eq!(load(canonical), load(markdown));
        assert_eq!(load(canonical), parse(canonical));
    }

    #[test]
    fn canonical_prose_is_not_turned_into_descriptions() {
        let source = "[module: Math]
desc: Math utilities.
TODO tidy this file
[function: add]
desc: Adds two numbers.
see also sub";
        assert_eq!(load(source), parse(source));
        assert_eq!(load(source).module.functions[0].desc, "Adds two numbers.");

        let (_, skipped) = load_with_diagnostics(source);
        let lines: Vec<_> = skipped.iter().map(|s| (s.line, s.reason)).collect();
        assert_eq!(
            lines,
            [(3, SkipReason::Unrecognized), (6, SkipReason::Unrecognized)]
        );
    }

    #[test]
    fn diagnostics_point_at_source_lines() {
        let (_, skipped) = load_with_diagnostics("\n\n[module: M]\n[function: f]\nparam: x - bad");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].line, 5);
        assert_eq!(skipped[0].reason, SkipReason::MalformedParam);
    }

    #[test]
    fn markdown_diagnostics_point_at_source_lines() {
        let source = "\n# M\n\n## f\n- plain bullet\n## g\n**Returns**: nothing";
        let (doc, skipped) = load_with_diagnostics(source);
        assert_eq!(doc.module.functions.len(), 2);
        let lines: Vec<_> = skipped.iter().map(|s| (s.line, s.text.as_str())).collect();
        assert_eq!(lines, [(5, "- plain bullet"), (7, "**Returns**: nothing")]);
    }

    #[test]
    fn canonical_text_passes_through_unchanged() {
        let source = "[module: M]\nloose prose";
        assert_eq!(to_canonical(source), source);
        assert_eq!(to_canonical("# M\nAbout."), "[module: M]\ndesc: About.");
    }
}
