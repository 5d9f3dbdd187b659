// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document structure - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! - Heading levels never skip (h1 -> h3) and an h1 exists
//! - Headings and table header cells carry text
//! - Main, navigation, banner and contentinfo landmarks exist
//! - Navigation blocks with several links use a list

use crate::catalog::CheckDefinition;
use crate::dom::{Document, NodeId};
use crate::finding::Finding;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Landmark name, the element that provides it, and the equivalent role
const LANDMARKS: &[(&str, &str, &str)] = &[
    ("main", "main", "main"),
    ("navigation", "nav", "navigation"),
    ("banner", "header", "banner"),
    ("contentinfo", "footer", "contentinfo"),
];

/// Numeric level of an `h1`..`h6` element
fn heading_level(document: &Document, node: NodeId) -> Option<u8> {
    let tag = document.tag_name(node)?;
    let digit = tag.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

/// Skipped heading levels, and headings without any h1
pub fn heading_hierarchy(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut previous = 0u8;
    let mut seen_any = false;
    let mut has_h1 = false;

    for node in document.elements_by_tag(HEADINGS) {
        let Some(level) = heading_level(document, node) else {
            continue;
        };
        seen_any = true;
        has_h1 |= level == 1;

        if previous > 0 && level > previous + 1 {
            findings.push(check.finding(
                format!("Heading level skipped: H{} to H{}.", previous, level),
                document.snippet(node),
            ));
        }
        previous = level;
    }

    if seen_any && !has_h1 {
        findings.push(check.finding("Page has headings but is missing an H1 element.", ""));
    }

    findings
}

/// One finding per landmark with neither its element nor its role present
pub fn missing_landmarks(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    LANDMARKS
        .iter()
        .filter(|(_, tag, role)| {
            document.first_by_tag(tag).is_none()
                && document.elements_with_attr_value("role", role).next().is_none()
        })
        .map(|(name, _, _)| check.finding(format!("Missing \"{}\" landmark region.", name), ""))
        .collect()
}

pub fn empty_table_headers(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements_by_tag(&["th"])
        .filter(|&th| document.is_text_empty(th))
        .map(|th| check.finding("Table header cell is empty.", document.snippet(th)))
        .collect()
}

/// Headings with no text, reported level by level (all h1s, then all h2s, ...)
pub fn empty_headings(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, tag) in HEADINGS.iter().enumerate() {
        for node in document.elements_by_tag(std::slice::from_ref(tag)) {
            if document.is_text_empty(node) {
                findings.push(check.finding(
                    format!("Empty H{} element found.", index + 1),
                    document.snippet(node),
                ));
            }
        }
    }

    findings
}

/// Navigation regions with more than one link and no `ul`/`ol`
pub fn missing_list_structure(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements()
        .filter(|&node| document.is_tag(node, "nav") || document.attr_is(node, "role", "navigation"))
        .filter(|&nav| {
            document.descendants_by_tag(nav, &["a"]).nth(1).is_some()
                && document.descendants_by_tag(nav, &["ul", "ol"]).next().is_none()
        })
        .map(|nav| {
            check.finding(
                "Navigation contains multiple links but no list (ul/ol) structure.",
                document.snippet(nav),
            )
        })
        .collect()
}
