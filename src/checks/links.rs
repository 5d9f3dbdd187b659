// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link and button naming - WCAG 2.4.4 Link Purpose (Level A)
//!
//! Interactive elements must expose something a screen reader can announce:
//! visible text, an ARIA label, a title, or a labelled image/SVG inside.

use crate::catalog::CheckDefinition;
use crate::dom::{Document, NodeId};
use crate::finding::Finding;
use crate::query::is_blank;

fn non_empty_attr(document: &Document, node: NodeId, name: &str) -> bool {
    document
        .attr(node, name)
        .is_some_and(|value| !is_blank(value))
}

/// Whether `node` has an accessible name other than its own text.
///
/// Resolution order: non-empty `aria-label`, any `aria-labelledby`,
/// non-empty `title`, a descendant `img` with non-empty `alt`, or a
/// descendant `svg` whose first `title` has text.
pub fn has_accessible_name(document: &Document, node: NodeId) -> bool {
    if non_empty_attr(document, node, "aria-label") {
        return true;
    }
    if document.has_attr(node, "aria-labelledby") {
        return true;
    }
    if non_empty_attr(document, node, "title") {
        return true;
    }

    if document
        .descendants_by_tag(node, &["img"])
        .any(|img| non_empty_attr(document, img, "alt"))
    {
        return true;
    }

    document.descendants_by_tag(node, &["svg"]).any(|svg| {
        document
            .descendants_by_tag(svg, &["title"])
            .next()
            .is_some_and(|title| !document.is_text_empty(title))
    })
}

/// Links and buttons with no text and no accessible name
pub fn empty_links_buttons(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (tag, message) in [
        ("a", "Link has no text content or accessible name."),
        ("button", "Button has no text content or accessible name."),
    ] {
        for node in document.elements_by_tag(&[tag]) {
            if document.is_text_empty(node) && !has_accessible_name(document, node) {
                findings.push(check.finding(message, document.snippet(node)));
            }
        }
    }

    findings
}

/// Links with no announceable text.
///
/// Narrower than [`has_accessible_name`]: only the first `img[alt]` inside
/// the link is considered, and an SVG title counts only as part of the
/// link's own text.
pub fn missing_link_text(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements_by_tag(&["a"])
        .filter(|&link| document.is_text_empty(link))
        .filter(|&link| {
            !document.has_attr(link, "aria-label") && !document.has_attr(link, "aria-labelledby")
        })
        .filter(|&link| {
            !document
                .descendants_by_tag(link, &["img"])
                .find(|&img| document.has_attr(img, "alt"))
                .is_some_and(|img| non_empty_attr(document, img, "alt"))
        })
        .filter(|&link| !non_empty_attr(document, link, "title"))
        .map(|link| check.finding("Link has no accessible text content.", document.snippet(link)))
        .collect()
}
