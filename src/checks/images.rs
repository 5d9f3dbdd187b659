// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image checks - WCAG 1.1.1 Non-text Content (Level A), 1.4.4 Resize Text (Level AA)
//!
//! - Every `<img>` has an `alt` attribute unless it is explicitly decorative
//! - Every `<img>` declares `width` and `height`

use crate::catalog::CheckDefinition;
use crate::dom::Document;
use crate::finding::Finding;

/// Images with no `alt` attribute that are not marked decorative
pub fn missing_alt_text(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements_by_tag(&["img"])
        .filter(|&img| !document.has_attr(img, "alt"))
        .filter(|&img| {
            !document.attr_is(img, "role", "presentation")
                && !document.attr_is(img, "aria-hidden", "true")
        })
        .map(|img| check.finding("Image is missing the alt attribute.", document.snippet(img)))
        .collect()
}

/// Images without explicit dimensions
pub fn images_missing_dimensions(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    document
        .elements_by_tag(&["img"])
        .filter(|&img| !document.has_attr(img, "width") || !document.has_attr(img, "height"))
        .map(|img| {
            check.finding(
                "Image is missing explicit width and/or height attributes.",
                document.snippet(img),
            )
        })
        .collect()
}
