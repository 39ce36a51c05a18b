//! Color operator extraction from untokenized content-stream text
//!
//! Each operator family is found by its own pattern: a run of numeric
//! literals separated by whitespace, followed by the keyword on a word
//! boundary. The `sc`/`scn` family takes one, three or four operands, so it
//! gets one pattern per arity.
//!
//! One-operand patterns are ambiguous. In `0.5 0.2 0.1 scn` the text
//! `0.1 scn` also matches the one-operand form, and a malformed literal such
//! as `1.2.5 g` yields a match that starts mid-token. Two rules settle this:
//!
//! 1. A one-operand match whose preceding character is a digit or `.` is
//!    discarded, since its numeral is the tail of a longer literal.
//! 2. The surviving matches are ordered by start (longest first on ties) and
//!    any match overlapping an earlier accepted one is dropped, so a wider
//!    match always claims its operands.

use std::sync::OnceLock;

use regex::Regex;

use super::operator::{is_stroke_keyword, ColorOperator, ColorSpaceKind};

/// A PDF numeric literal: optional sign, digits with optional fraction, or a
/// bare fraction.
const NUMBER: &str = r"[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)";

/// PDF whitespace between tokens.
const SPACE: &str = r"[\t\n\x0C\r ]+";

struct Pattern {
    regex: Regex,
    kind: ColorSpaceKind,
    /// Apply the digit lookback rule to matches of this pattern.
    lookback_guard: bool,
}

impl Pattern {
    fn new(kind: ColorSpaceKind, keywords: &str) -> Self {
        let operands = vec![format!("({NUMBER})"); kind.arity()].join(SPACE);
        let source = format!(r"{operands}{SPACE}({keywords})\b");
        let regex = Regex::new(&source).expect("color operator pattern is valid");
        Self {
            regex,
            kind,
            lookback_guard: kind == ColorSpaceKind::Gray,
        }
    }
}

/// Finds color-setting operators in decompressed content-stream text.
///
/// The compiled patterns are reusable; [`scan`] shares one process-wide
/// instance.
///
/// # Example
///
/// ```
/// use dark_recolor::{ColorSpaceKind, OperatorExtractor};
///
/// let extractor = OperatorExtractor::new();
/// let ops = extractor.scan("0.5 0.2 0.1 rg 0.3 g");
/// assert_eq!(ops.len(), 2);
/// assert_eq!(ops[0].kind, ColorSpaceKind::Rgb);
/// assert_eq!(ops[1].kind, ColorSpaceKind::Gray);
/// ```
pub struct OperatorExtractor {
    patterns: Vec<Pattern>,
}

impl OperatorExtractor {
    /// Compile the operator patterns.
    pub fn new() -> Self {
        let patterns = vec![
            Pattern::new(ColorSpaceKind::Rgb, "rg|RG"),
            Pattern::new(ColorSpaceKind::Gray, "g|G"),
            Pattern::new(ColorSpaceKind::Cmyk, "k|K"),
            Pattern::new(ColorSpaceKind::Rgb, "scn|SCN|sc|SC"),
            Pattern::new(ColorSpaceKind::Gray, "scn|SCN|sc|SC"),
            Pattern::new(ColorSpaceKind::Cmyk, "scn|SCN|sc|SC"),
        ];
        Self { patterns }
    }

    /// Scan `content` for color operators.
    ///
    /// The result is ordered by span start and contains no overlapping
    /// spans. Text without color operators yields an empty vector.
    pub fn scan<'a>(&self, content: &'a str) -> Vec<ColorOperator<'a>> {
        let mut found = Vec::new();

        for pattern in &self.patterns {
            let arity = pattern.kind.arity();
            for caps in pattern.regex.captures_iter(content) {
                let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(arity + 1)) else {
                    continue;
                };
                if pattern.lookback_guard && follows_numeral(content, whole.start()) {
                    continue;
                }
                let values: Vec<&str> = (1..=arity)
                    .filter_map(|i| caps.get(i))
                    .map(|m| m.as_str())
                    .collect();
                found.push(ColorOperator {
                    kind: pattern.kind,
                    values,
                    keyword: keyword.as_str(),
                    is_stroke: is_stroke_keyword(keyword.as_str()),
                    span: whole.range(),
                });
            }
        }

        found.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });

        let mut accepted = Vec::with_capacity(found.len());
        let mut claimed_to = 0;
        for op in found {
            if op.span.start >= claimed_to {
                claimed_to = op.span.end;
                accepted.push(op);
            }
        }
        accepted
    }
}

impl Default for OperatorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn follows_numeral(content: &str, start: usize) -> bool {
    start
        .checked_sub(1)
        .and_then(|i| content.as_bytes().get(i))
        .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
}

/// Scan `content` with a shared [`OperatorExtractor`].
pub fn scan(content: &str) -> Vec<ColorOperator<'_>> {
    static EXTRACTOR: OnceLock<OperatorExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(OperatorExtractor::new).scan(content)
}
