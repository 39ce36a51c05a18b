//! Operator rewriting and batch substitution

use std::collections::HashMap;

use super::extractor::scan;
use super::operator::{ColorOperator, ColorSpaceKind};
use crate::color::{cmyk_to_rgb, lightness, rgb_to_cmyk, Color};
use crate::scheme::{map_color, map_document_color, Scheme};

/// Result of rewriting one content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The new content text.
    pub content: String,
    /// Number of distinct operator texts whose replacement differs from the
    /// original. Informational only.
    pub changed: usize,
}

/// Produce the replacement text for one operator.
///
/// Gray operands are mapped by lightness, RGB operands by classification,
/// CMYK operands through RGB and back. Under a tinted scheme gray and CMYK
/// operators come out as three-operand `rg`/`RG` so the tint is kept.
///
/// # Example
/// ```
/// use dark_recolor::{rewrite, scan, Scheme};
///
/// let ops = scan("0 0 0 RG");
/// assert_eq!(rewrite(&ops[0], &Scheme::default()), "0.878 0.878 0.878 RG");
/// ```
pub fn rewrite(op: &ColorOperator<'_>, scheme: &Scheme) -> String {
    let v = op.operands();
    let operand = |i: usize| v.get(i).copied().unwrap_or(0.0);
    let tinted = scheme.is_tinted();

    match op.kind {
        ColorSpaceKind::Gray => {
            let mapped = map_document_color(operand(0), scheme);
            if tinted {
                format_rgb(mapped, rgb_keyword(op))
            } else {
                format!(
                    "{} {}",
                    format_value(lightness(mapped.r, mapped.g, mapped.b)),
                    op.keyword
                )
            }
        }
        ColorSpaceKind::Rgb => {
            let mapped = map_color(operand(0), operand(1), operand(2), scheme);
            format_rgb(mapped, op.keyword)
        }
        ColorSpaceKind::Cmyk => {
            let (r, g, b) = cmyk_to_rgb(operand(0), operand(1), operand(2), operand(3));
            let mapped = map_color(r, g, b, scheme);
            if tinted {
                format_rgb(mapped, rgb_keyword(op))
            } else {
                let (c, m, y, k) = rgb_to_cmyk(mapped.r, mapped.g, mapped.b);
                format!(
                    "{} {} {} {} {}",
                    format_value(c),
                    format_value(m),
                    format_value(y),
                    format_value(k),
                    op.keyword
                )
            }
        }
    }
}

/// Scan and rewrite a whole content stream in one batch.
///
/// Every matched span is replaced by the rewrite of its original text;
/// identical operator text always gets identical replacement. Text outside
/// matched spans is copied unchanged.
///
/// # Example
/// ```
/// use dark_recolor::{scan_and_rewrite, Scheme};
///
/// let out = scan_and_rewrite("1 1 1 rg 0 0 612 792 re f 0 g", &Scheme::default());
/// assert_eq!(out.content, "0.102 0.102 0.102 rg 0 0 612 792 re f 0.878 g");
/// assert_eq!(out.changed, 2);
/// ```
pub fn scan_and_rewrite(content: &str, scheme: &Scheme) -> Rewrite {
    let ops = scan(content);

    let mut replacements: HashMap<&str, String> = HashMap::new();
    for op in &ops {
        replacements
            .entry(op.text(content))
            .or_insert_with(|| rewrite(op, scheme));
    }

    let changed = replacements
        .iter()
        .filter(|(original, replacement)| **original != replacement.as_str())
        .count();
    if changed == 0 {
        return Rewrite {
            content: content.to_string(),
            changed,
        };
    }

    let mut out = String::with_capacity(content.len() + content.len() / 8);
    let mut cursor = 0;
    for op in &ops {
        let original = op.text(content);
        out.push_str(&content[cursor..op.span.start]);
        out.push_str(replacements.get(original).map_or(original, String::as_str));
        cursor = op.span.end;
    }
    out.push_str(&content[cursor..]);

    Rewrite {
        content: out,
        changed,
    }
}

/// Keyword used when a gray or CMYK operator is promoted to RGB.
fn rgb_keyword(op: &ColorOperator<'_>) -> &'static str {
    if op.is_stroke {
        "RG"
    } else {
        "rg"
    }
}

fn format_rgb(color: Color, keyword: &str) -> String {
    format!(
        "{} {} {} {}",
        format_value(color.r),
        format_value(color.g),
        format_value(color.b),
        keyword
    )
}

/// Three-decimal operand text, clamped to the valid range.
fn format_value(v: f64) -> String {
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    // clamp keeps -0.0, which would print as "-0.000"
    format!("{:.3}", v + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite_one(content: &str, scheme: &Scheme) -> String {
        let ops = scan(content);
        assert_eq!(ops.len(), 1, "expected a single operator in {content:?}");
        rewrite(&ops[0], scheme)
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.10196), "0.102");
        assert_eq!(format_value(-0.0), "0.000");
        assert_eq!(format_value(-0.3), "0.000");
        assert_eq!(format_value(1.7), "1.000");
        assert_eq!(format_value(f64::NAN), "0.000");
    }

    #[test]
    fn test_neutral_scheme_keeps_families() {
        let dark = Scheme::default();
        assert_eq!(rewrite_one("1 g", &dark), "0.102 g");
        assert_eq!(rewrite_one("0 G", &dark), "0.878 G");
        assert_eq!(rewrite_one("0 0 0 1 k", &dark), "0.000 0.000 0.000 0.122 k");
        assert_eq!(rewrite_one("0 0 0 0 K", &dark), "0.000 0.000 0.000 0.898 K");
        assert_eq!(rewrite_one("1 sc", &dark), "0.102 sc");
    }

    #[test]
    fn test_tinted_scheme_promotes_to_rgb() {
        let nord = Scheme::preset("nord").unwrap();
        assert_eq!(rewrite_one("1 g", &nord), "0.180 0.204 0.251 rg");
        assert_eq!(rewrite_one("0 G", &nord), "0.925 0.937 0.957 RG");
        assert_eq!(rewrite_one("0 0 0 0 k", &nord), "0.180 0.204 0.251 rg");
        assert_eq!(rewrite_one("0 0 0 1 K", &nord), "0.925 0.937 0.957 RG");
        assert_eq!(rewrite_one("1 scn", &nord), "0.180 0.204 0.251 rg");
        assert_eq!(rewrite_one("0 0 0 1 SCN", &nord), "0.925 0.937 0.957 RG");
        // RGB operators keep their keyword either way
        assert_eq!(rewrite_one("1 1 1 sc", &nord), "0.180 0.204 0.251 sc");
    }

    #[test]
    fn test_colorful_rgb_stays_colorful() {
        let out = rewrite_one("0.9 0.1 0.1 rg", &Scheme::default());
        let values: Vec<f64> = out
            .split_whitespace()
            .take(3)
            .map(|v| v.parse().unwrap())
            .collect();
        assert!(values[0] > values[1] && values[0] > values[2], "{out}");
        assert!(out.ends_with(" rg"));
    }

    #[test]
    fn test_untouched_text_passes_through() {
        let content = "q 0.1 0.1 0.1 RG 2 w 72 72 m 144 144 l S Q\nBT /F1 12 Tf (Hi) Tj ET";
        let out = scan_and_rewrite(content, &Scheme::default());
        assert_eq!(
            out.content,
            "q 0.878 0.878 0.878 RG 2 w 72 72 m 144 144 l S Q\nBT /F1 12 Tf (Hi) Tj ET"
        );
        assert_eq!(out.changed, 1);
    }

    #[test]
    fn test_substring_operator_not_rewritten_twice() {
        // "1 g" occurs inside "0.1 g" as plain text
        let content = "0.1 g 1 g";
        let out = scan_and_rewrite(content, &Scheme::default());
        assert_eq!(out.content, "0.878 g 0.102 g");
        assert_eq!(out.changed, 2);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let out = scan_and_rewrite("0 g (a) Tj 0 g (b) Tj 0 g", &Scheme::default());
        assert_eq!(out.content, "0.878 g (a) Tj 0.878 g (b) Tj 0.878 g");
        assert_eq!(out.changed, 1);
    }

    #[test]
    fn test_no_change_returns_input() {
        let content = "BT /F1 12 Tf (nothing to see) Tj ET";
        let out = scan_and_rewrite(content, &Scheme::default());
        assert_eq!(out.content, content);
        assert_eq!(out.changed, 0);
    }
}
