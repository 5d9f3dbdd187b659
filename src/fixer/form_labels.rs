// SPDX-License-Identifier: PMPL-1.0-or-later
//! Screen-reader label injection for unlabeled form fields
//!
//! Uses the same field selection as the `missing_form_labels` check, so a
//! fragment run through this fix no longer reports the fields it labelled.

use crate::checks::forms::unlabeled_fields;
use crate::dom::{Document, NodeId};
use rand::Rng;
use tracing::debug;

/// Prefix of generated field ids
pub const FIELD_ID_PREFIX: &str = "wpag-field-";

/// Classes put on injected labels
pub const LABEL_CLASS: &str = "wpag-auto-label screen-reader-text";

const RANDOM_ID_ATTEMPTS: usize = 32;

/// Label fields in an HTML fragment.
///
/// Returns `None` when no label was inserted, in which case the caller
/// keeps the original markup byte for byte.
pub fn add_form_labels(html: &str) -> Option<String> {
    add_form_labels_with_rng(html, &mut rand::thread_rng())
}

/// [`add_form_labels`] with a caller-supplied random source for field ids
pub fn add_form_labels_with_rng<R: Rng>(html: &str, rng: &mut R) -> Option<String> {
    if !contains_form_field(html) {
        return None;
    }

    let mut document = Document::parse_fragment(html);
    let mut inserted = 0usize;

    for field in unlabeled_fields(&document) {
        let Some(text) = label_text(&document, field) else {
            debug!("Skipping unlabeled field with no placeholder or name");
            continue;
        };

        let id = match document.attr(field, "id").filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let Some(id) = generate_field_id(&document, rng) else {
                    debug!("No free field id left, skipping field");
                    continue;
                };
                document.set_attr(field, "id", &id);
                id
            }
        };

        let label =
            document.create_element("label", &[("for", id.as_str()), ("class", LABEL_CLASS)]);
        document.append_text(label, &text);
        if document.insert_before(field, label) {
            debug!(%id, label = %text, "Inserted form label");
            inserted += 1;
        }
    }

    (inserted > 0).then(|| document.to_html())
}

fn contains_form_field(html: &str) -> bool {
    let lowered = html.to_ascii_lowercase();
    ["<input", "<select", "<textarea"]
        .iter()
        .any(|tag| lowered.contains(tag))
}

/// Label text for a field: its placeholder, else its `name` in title case
fn label_text(document: &Document, field: NodeId) -> Option<String> {
    if let Some(placeholder) = document
        .attr(field, "placeholder")
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        return Some(placeholder.to_string());
    }

    document
        .attr(field, "name")
        .map(humanize_name)
        .filter(|text| !text.trim().is_empty())
}

/// `first_name` / `first-name` / `tags[]` -> `First Name` / `First Name` / `Tags`
pub fn humanize_name(name: &str) -> String {
    let spaced = name.replace("[]", "").replace(['_', '-'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;

    for c in spaced.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = c.is_whitespace();
    }
    out
}

/// A `wpag-field-NNNN` id not used anywhere in the document
fn generate_field_id<R: Rng>(document: &Document, rng: &mut R) -> Option<String> {
    let free = |n: u32| {
        let id = format!("{}{}", FIELD_ID_PREFIX, n);
        document.element_by_id(&id).is_none().then_some(id)
    };

    (0..RANDOM_ID_ATTEMPTS)
        .find_map(|_| free(rng.gen_range(1000..=9999)))
        .or_else(|| (1000..=9999).find_map(free))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CheckId;
    use crate::checks::run_check;
    use crate::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_humanize_name() {
        assert_eq!(humanize_name("first_name"), "First Name");
        assert_eq!(humanize_name("billing-address"), "Billing Address");
        assert_eq!(humanize_name("tags[]"), "Tags");
        assert_eq!(humanize_name("email"), "Email");
        assert_eq!(humanize_name("camelCase"), "CamelCase");
    }

    #[test]
    fn test_label_from_name_when_placeholder_empty() {
        let html = r#"<input name="first_name" placeholder="">"#;
        let fixed = add_form_labels_with_rng(html, &mut seeded()).expect("label inserted");

        let pattern = Regex::new(
            r#"^<label for="(wpag-field-\d{4})" class="wpag-auto-label screen-reader-text">First Name</label><input name="first_name" placeholder="" id="(wpag-field-\d{4})">$"#,
        )
        .unwrap();
        let caps = pattern.captures(&fixed).expect("label markup");
        assert_eq!(&caps[1], &caps[2]);
    }

    #[test]
    fn test_label_from_placeholder_and_existing_id() {
        let html = r#"<p><input id="q" placeholder="Search the site"></p>"#;
        let fixed = add_form_labels_with_rng(html, &mut seeded()).expect("label inserted");
        assert_eq!(
            fixed,
            r#"<p><label for="q" class="wpag-auto-label screen-reader-text">Search the site</label><input id="q" placeholder="Search the site"></p>"#
        );
    }

    #[test]
    fn test_attributes_keep_source_order() {
        let html = r#"<form method="post" action="/join" class="signup"><input type="email" name="user_email" class="wide" data-track="1" required></form>"#;
        let fixed = add_form_labels_with_rng(html, &mut seeded()).expect("label inserted");
        assert!(fixed.starts_with(r#"<form method="post" action="/join" class="signup"><label for="wpag-field-"#));
        assert!(
            fixed.contains(r#"<input type="email" name="user_email" class="wide" data-track="1" required="" id="wpag-field-"#),
            "{}",
            fixed
        );
    }

    #[test]
    fn test_labelled_and_nameless_fields_are_left_alone() {
        let html = r#"<label for="a">A</label><input id="a"><input type="text"><input type="submit">"#;
        assert_eq!(add_form_labels_with_rng(html, &mut seeded()), None);
    }

    #[test]
    fn test_no_fields_no_parse() {
        assert_eq!(add_form_labels("<p>Nothing to label</p>"), None);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let html = r#"<input name="a"><input name="b"><select name="c"></select><textarea name="d"></textarea>"#;
        let fixed = add_form_labels_with_rng(html, &mut seeded()).expect("labels inserted");
        let doc = Document::parse_fragment(&fixed);

        let ids: Vec<_> = doc
            .elements_by_tag(&["input", "select", "textarea"])
            .filter_map(|f| doc.attr(f, "id"))
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_fixed_fragment_passes_the_check() {
        let html = r#"<form><input name="user_email"><textarea placeholder="Message"></textarea></form>"#;
        let fixed = add_form_labels(html).expect("labels inserted");
        let catalog = Catalog::wcag22();
        let findings = run_check(
            catalog.definition(CheckId::MissingFormLabels),
            &Document::parse_fragment(&fixed),
        );
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let html = r#"<input name="city">"#;
        let fixed = add_form_labels(html).expect("label inserted");
        assert_eq!(add_form_labels(&fixed), None);
    }
}
