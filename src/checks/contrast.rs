// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Best effort: only elements whose inline style sets both `color` and
//! `background-color` are evaluated, and colors that do not parse are
//! skipped. Font size cannot be derived from inline styles, so the 4.5:1
//! normal-text threshold is always applied, never the 3:1 large-text one.

use super::styles::style_property;
use crate::catalog::CheckDefinition;
use crate::color::{contrast_ratio, parse_color, AA_NORMAL_TEXT};
use crate::dom::Document;
use crate::finding::Finding;

/// Ratio rounded to two decimals without trailing zeros: `1.5`, `3`, `4.48`
fn format_ratio(ratio: f64) -> String {
    let fixed = format!("{:.2}", ratio);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Inline color pairs below 4.5:1
pub fn color_contrast(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in document.elements_with_attr("style") {
        let style = document.attr(node, "style").unwrap_or_default();

        let (Some(fg), Some(bg)) = (
            style_property(style, "color").and_then(|v| parse_color(&v)),
            style_property(style, "background-color").and_then(|v| parse_color(&v)),
        ) else {
            continue;
        };

        let ratio = contrast_ratio(fg, bg);
        if ratio < AA_NORMAL_TEXT {
            findings.push(check.finding(
                format!(
                    "Contrast ratio is {}:1 (minimum 4.5:1 required for normal text).",
                    format_ratio(ratio)
                ),
                document.snippet(node),
            ));
        }
    }

    findings
}
