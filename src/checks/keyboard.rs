// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard accessibility - WCAG 2.1.1, 2.4.1, 2.4.3, 2.4.7
//!
//! - Focus outlines are not removed in CSS
//! - A skip link sits near the top of `<body>`
//! - No positive `tabindex` values

use crate::catalog::CheckDefinition;
use crate::dom::{truncate_chars, Document, NodeId, SNIPPET_LIMIT};
use crate::finding::Finding;
use regex::Regex;
use std::sync::LazyLock;

static FOCUS_OUTLINE_REMOVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):focus\s*\{[^}]*(outline\s*:\s*(none|0))").expect("valid regex")
});

static INLINE_OUTLINE_REMOVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)outline\s*:\s*(none|0)\b").expect("valid regex"));

/// `:focus` rules in `<style>` blocks and inline styles that remove the outline
pub fn missing_focus_indicators(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for style in document.elements_by_tag(&["style"]) {
        let css = document.text_content(style);
        if let Some(rule) = FOCUS_OUTLINE_REMOVED.find(&css) {
            findings.push(check.finding(
                "CSS rule removes focus outline. Keyboard users need visible focus indicators.",
                truncate_chars(rule.as_str(), SNIPPET_LIMIT),
            ));
        }
    }

    for node in document.elements_with_attr_containing("style", "outline") {
        let style = document.attr(node, "style").unwrap_or_default();
        if INLINE_OUTLINE_REMOVED.is_match(style) {
            findings.push(check.finding(
                "Inline style removes outline. This may hide focus indicators.",
                document.snippet(node),
            ));
        }
    }

    findings
}

fn is_skip_link(document: &Document, node: NodeId) -> bool {
    document.is_tag(node, "a")
        && document.attr(node, "href").is_some_and(|href| href.starts_with('#'))
        && document.trimmed_text(node).to_lowercase().contains("skip")
}

/// Looks at the leading children of `<body>` and one level below them
pub fn missing_skip_nav(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    if document.first_by_tag("body").is_none() {
        return Vec::new();
    }

    let found = document.leading_body_elements().into_iter().any(|child| {
        is_skip_link(document, child)
            || document
                .element_children(child)
                .any(|grandchild| is_skip_link(document, grandchild))
    });

    if found {
        Vec::new()
    } else {
        vec![check.finding("No skip navigation link found near the top of the page.", "")]
    }
}

/// Leading integer of a `tabindex` value; anything else reads as 0
fn leading_integer(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<i64>() {
        Ok(n) => sign * n,
        // Out-of-range digit runs saturate
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    }
}

pub fn tabindex_positive(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements_with_attr("tabindex")
        .filter_map(|node| {
            let value = leading_integer(document.attr(node, "tabindex").unwrap_or_default());
            (value > 0).then(|| {
                check.finding(
                    format!(
                        "Element has tabindex=\"{}\". Positive tabindex disrupts natural tab order.",
                        value
                    ),
                    document.snippet(node),
                )
            })
        })
        .collect()
}
