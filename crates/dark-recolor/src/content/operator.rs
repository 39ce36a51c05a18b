//! Color operator occurrences found in content-stream text

use std::ops::Range;

/// Color space family implied by an operator's operand count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceKind {
    /// One operand (`g`, `G`, one-operand `sc`/`scn`)
    Gray,
    /// Three operands (`rg`, `RG`, three-operand `sc`/`scn`)
    Rgb,
    /// Four operands (`k`, `K`, four-operand `sc`/`scn`)
    Cmyk,
}

impl ColorSpaceKind {
    /// Number of numeric operands the family consumes.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            ColorSpaceKind::Gray => 1,
            ColorSpaceKind::Rgb => 3,
            ColorSpaceKind::Cmyk => 4,
        }
    }
}

/// One color-setting operator matched in a content stream.
///
/// Borrows its operand and keyword text from the scanned content, so it
/// cannot outlive the stream it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOperator<'a> {
    /// Color space family, fixed by the operand count.
    pub kind: ColorSpaceKind,
    /// Operand literals as written; `values.len() == kind.arity()`.
    pub values: Vec<&'a str>,
    /// Operator keyword as written (`rg`, `G`, `scn`, ...).
    pub keyword: &'a str,
    /// True for stroking operators (upper-case keywords).
    pub is_stroke: bool,
    /// Byte range of operands plus keyword in the scanned text.
    pub span: Range<usize>,
}

impl<'a> ColorOperator<'a> {
    /// The exact matched text within `content`.
    ///
    /// `content` must be the text this operator was scanned from.
    #[inline]
    pub fn text<'c>(&self, content: &'c str) -> &'c str {
        &content[self.span.clone()]
    }

    /// Operands parsed as floats; malformed literals read as 0.0.
    pub fn operands(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| v.parse::<f64>().unwrap_or(0.0))
            .collect()
    }
}

/// True for the stroking spelling of a color keyword.
#[inline]
pub(crate) fn is_stroke_keyword(keyword: &str) -> bool {
    keyword.starts_with(|c: char| c.is_ascii_uppercase())
}
