// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page-level checks
//!
//! - 3.1.1 Language of Page: `<html lang>` or `xml:lang`
//! - 2.4.2 Page Titled: a non-empty `<title>`
//! - 4.1.1 Parsing: no repeated `id` values
//! - 1.4.4 Resize Text: a viewport meta tag that allows zooming

use crate::catalog::CheckDefinition;
use crate::dom::Document;
use crate::finding::Finding;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static USER_SCALABLE_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)user-scalable\s*=\s*no").expect("valid regex"));

static MAXIMUM_SCALE_ONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)maximum-scale\s*=\s*1(\.0)?(\s|;|,|$)").expect("valid regex")
});

pub fn missing_lang_attr(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let Some(html) = document.first_by_tag("html") else {
        return Vec::new();
    };

    if document.has_attr(html, "lang") || document.has_attr(html, "xml:lang") {
        return Vec::new();
    }

    vec![check.finding(
        "The HTML element is missing a lang attribute.",
        document.start_tag(html),
    )]
}

pub fn missing_page_title(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    match document.first_by_tag("title") {
        Some(title) if !document.is_text_empty(title) => Vec::new(),
        _ => vec![check.finding("Page is missing a title element or the title is empty.", "")],
    }
}

/// Every repeat of an `id` value; the first occurrence is not reported
pub fn duplicate_ids(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut seen = HashSet::new();
    let mut findings = Vec::new();

    for node in document.elements_with_attr("id") {
        let id = document.attr(node, "id").unwrap_or_default();
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id) {
            findings.push(check.finding(
                format!("Duplicate ID found: \"{}\".", id),
                document.snippet(node),
            ));
        }
    }

    findings
}

/// Missing viewport meta, or one that blocks pinch zoom
pub fn missing_viewport_meta(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let Some(meta) = document
        .elements_with_attr_value("name", "viewport")
        .find(|&node| document.is_tag(node, "meta"))
    else {
        return vec![check.finding("Page is missing a viewport meta tag.", "")];
    };

    let content = document.attr(meta, "content").unwrap_or_default();
    let mut findings = Vec::new();

    if USER_SCALABLE_NO.is_match(content) {
        findings.push(check.finding(
            "Viewport meta disables user scaling (user-scalable=no).",
            document.snippet(meta),
        ));
    }
    if MAXIMUM_SCALE_ONE.is_match(content) {
        findings.push(check.finding(
            "Viewport meta restricts scaling to maximum-scale=1.",
            document.snippet(meta),
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use crate::catalog::CheckId;
    use crate::checks::run;
    use crate::finding::Severity;

    #[test]
    fn test_lang_present() {
        assert!(run(CheckId::MissingLangAttr, r#"<html lang="en"><body></body></html>"#).is_empty());
        assert!(run(CheckId::MissingLangAttr, r#"<html xml:lang="en"><body></body></html>"#).is_empty());
    }

    #[test]
    fn test_lang_missing_reports_start_tag() {
        let findings = run(CheckId::MissingLangAttr, r#"<html class="no-js"><body></body></html>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element, r#"<html class="no-js">"#);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_page_title() {
        assert!(run(CheckId::MissingPageTitle, "<title>Home</title>").is_empty());
        assert_eq!(run(CheckId::MissingPageTitle, "<title>  </title>").len(), 1);
        assert_eq!(run(CheckId::MissingPageTitle, "<p>No title</p>").len(), 1);
        assert!(run(CheckId::MissingPageTitle, "<title>\u{2003}</title>").is_empty());
    }

    #[test]
    fn test_duplicate_ids_reports_each_repeat() {
        let html = r#"<p id="x">1</p><p id="x">2</p><p id="x">3</p><p id="">e</p><p id="">f</p>"#;
        let findings = run(CheckId::DuplicateIds, html);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message, "Duplicate ID found: \"x\".");
        assert_eq!(findings[0].element, r#"<p id="x">2</p>"#);
        assert_eq!(findings[1].element, r#"<p id="x">3</p>"#);
    }

    #[test]
    fn test_viewport_missing() {
        let findings = run(CheckId::MissingViewportMeta, "<title>t</title>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Page is missing a viewport meta tag.");
        assert_eq!(findings[0].element, "");
    }

    #[test]
    fn test_viewport_restrictions() {
        let html = r#"<meta name="viewport" content="width=device-width, maximum-scale=1.0, user-scalable=no">"#;
        let findings = run(CheckId::MissingViewportMeta, html);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("user-scalable=no"));
        assert!(findings[1].message.contains("maximum-scale=1"));
        assert!(findings[1].element.starts_with("<meta"));
    }

    #[test]
    fn test_viewport_larger_maximum_scale_is_fine() {
        let html = r#"<meta name="viewport" content="width=device-width, maximum-scale=10">"#;
        assert!(run(CheckId::MissingViewportMeta, html).is_empty());
    }
}
