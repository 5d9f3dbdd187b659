// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form labels - WCAG 1.3.1 Info and Relationships, 4.1.2 Name, Role, Value (Level A)
//!
//! A field counts as labelled when it has `aria-label`/`aria-labelledby`,
//! a `<label for>` pointing at its id, a wrapping `<label>`, or a `title`.
//! The label fixer repairs exactly the fields this check reports.

use crate::catalog::CheckDefinition;
use crate::dom::{Document, NodeId};
use crate::finding::Finding;

/// `input` types that never need a visible label
const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "image", "reset"];

/// Whether `node` is a form field that requires a label
pub fn is_labelable_field(document: &Document, node: NodeId) -> bool {
    match document.tag_name(node) {
        Some("select" | "textarea") => true,
        Some("input") => !document
            .attr(node, "type")
            .is_some_and(|t| UNLABELLED_INPUT_TYPES.contains(&t)),
        _ => false,
    }
}

fn has_label_for(document: &Document, id: &str) -> bool {
    document
        .elements_by_tag(&["label"])
        .any(|label| document.attr_is(label, "for", id))
}

/// Whether the field already has a label or accessible name
pub fn is_labelled(document: &Document, field: NodeId) -> bool {
    if document.has_attr(field, "aria-label") || document.has_attr(field, "aria-labelledby") {
        return true;
    }
    if let Some(id) = document.attr(field, "id").filter(|id| !id.is_empty()) {
        if has_label_for(document, id) {
            return true;
        }
    }
    document.has_ancestor(field, "label") || document.has_attr(field, "title")
}

/// Fields without any label, in document order
pub fn unlabeled_fields(document: &Document) -> Vec<NodeId> {
    document
        .elements()
        .filter(|&node| is_labelable_field(document, node))
        .filter(|&field| !is_labelled(document, field))
        .collect()
}

pub fn missing_form_labels(check: &CheckDefinition, document: &Document) -> Vec<Finding> {
    unlabeled_fields(document)
        .into_iter()
        .map(|field| {
            check.finding(
                "Form field has no associated label or accessible name.",
                document.snippet(field),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CheckId;
    use crate::checks::run;

    #[test]
    fn test_labelling_sources() {
        let html = r#"
            <label for="a">A</label><input id="a">
            <label>B <input name="b"></label>
            <input aria-label="C">
            <input aria-labelledby="lbl">
            <input title="E">
            <input name="unlabelled">
        "#;
        let findings = run(CheckId::MissingFormLabels, html);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].element.contains("unlabelled"));
    }

    #[test]
    fn test_exempt_input_types() {
        let html = r#"
            <input type="hidden" name="h">
            <input type="submit" value="Go">
            <input type="button" value="B">
            <input type="image" src="go.png" alt="Go">
            <input type="reset">
            <input type="email" name="mail">
        "#;
        let findings = run(CheckId::MissingFormLabels, html);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].element.contains("mail"));
    }

    #[test]
    fn test_select_and_textarea() {
        let html = r#"<select name="s"><option>1</option></select><textarea name="t"></textarea>"#;
        assert_eq!(run(CheckId::MissingFormLabels, html).len(), 2);
    }

    #[test]
    fn test_label_for_must_match_id() {
        let doc = Document::parse(r#"<label for="other">X</label><input id="mine">"#);
        assert_eq!(unlabeled_fields(&doc).len(), 1);
    }
}
