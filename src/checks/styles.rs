// SPDX-License-Identifier: PMPL-1.0-or-later
//! Inline style checks - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Inline `style` values are read as raw CSS text; there is no cascade.
//! - Text hidden with `display:none` but still exposed to assistive tech
//! - Font sizes below 10px / 8pt

use crate::catalog::CheckDefinition;
use crate::dom::Document;
use crate::finding::Finding;
use regex::Regex;
use std::sync::LazyLock;

/// Tags whose hidden content is expected
const HIDDEN_BY_DESIGN: &[&str] = &["script", "template", "noscript"];

static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("valid regex"));

static FONT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-size\s*:\s*(\d+)(px|pt)").expect("valid regex"));

/// Value of a declaration in an inline style string, e.g. `color` in
/// `"color: red; background-color: #fff"`. The property must start the
/// string or follow a `;`, so `color` does not match `background-color`.
pub fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Hidden text without `aria-hidden`, and unreadably small fonts
pub fn inline_styles_a11y(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in document.elements_with_attr("style") {
        let style = document.attr(node, "style").unwrap_or_default();

        if DISPLAY_NONE.is_match(style) && !document.attr_is(node, "aria-hidden", "true") {
            // Hidden script-like content is passed over entirely, font size included
            if HIDDEN_BY_DESIGN.iter().any(|tag| document.is_tag(node, tag)) {
                continue;
            }
            if !document.is_text_empty(node) {
                findings.push(check.finding(
                    "Element with text content is hidden via display:none without aria-hidden=\"true\".",
                    document.snippet(node),
                ));
            }
        }

        if let Some(caps) = FONT_SIZE.captures(style) {
            let size: f64 = caps[1].parse().unwrap_or(f64::MAX);
            let too_small = match caps[2].to_ascii_lowercase().as_str() {
                "px" => size < 10.0,
                _ => size < 8.0,
            };
            if too_small {
                findings.push(check.finding(
                    format!(
                        "Very small font size ({}) may be unreadable for users with low vision.",
                        &caps[0]
                    ),
                    document.snippet(node),
                ));
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CheckId;
    use crate::checks::run;

    #[test]
    fn test_style_property() {
        let style = "background-color: #fff; color:  Red ;font-size:12px";
        assert_eq!(style_property(style, "color").as_deref(), Some("Red"));
        assert_eq!(style_property(style, "background-color").as_deref(), Some("#fff"));
        assert_eq!(style_property(style, "COLOR").as_deref(), Some("Red"));
        assert_eq!(style_property(style, "border"), None);
        assert_eq!(style_property("color:", "color"), None);
    }

    #[test]
    fn test_hidden_text_without_aria_hidden() {
        let html = r#"
            <div style="display: none">Hidden text</div>
            <div style="display:none" aria-hidden="true">Hidden properly</div>
            <div style="DISPLAY:NONE"></div>
            <noscript style="display:none">Enable JS</noscript>
        "#;
        let findings = run(CheckId::InlineStylesA11y, html);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].element.contains("Hidden text"));
    }

    #[test]
    fn test_small_font_sizes() {
        let html = r#"
            <p style="font-size: 9px">tiny</p>
            <p style="font-size: 10px">ok</p>
            <p style="font-size:7pt">tiny pt</p>
            <p style="font-size: 8pt">ok pt</p>
            <p style="font-size: 0.5em">relative</p>
        "#;
        let findings = run(CheckId::InlineStylesA11y, html);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("font-size: 9px"));
        assert!(findings[1].message.contains("font-size:7pt"));
    }

    #[test]
    fn test_hidden_script_like_elements_skip_font_check() {
        let html = r#"
            <noscript style="display:none;font-size:6px">Enable JS</noscript>
            <template style="display: none; font-size: 5pt"><p>row</p></template>
            <noscript style="font-size:6px">Visible fallback</noscript>
        "#;
        let findings = run(CheckId::InlineStylesA11y, html);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].element.contains("Visible fallback"));
    }

    #[test]
    fn test_one_element_can_trigger_both() {
        let findings = run(
            CheckId::InlineStylesA11y,
            r#"<span style="display:none;font-size:6px">x</span>"#,
        );
        assert_eq!(findings.len(), 2);
    }
}
