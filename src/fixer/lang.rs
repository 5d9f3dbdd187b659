// SPDX-License-Identifier: PMPL-1.0-or-later
//! `lang` attribute fix for the `<html>` element's attribute string

/// Append ` lang="<language>"` unless the attributes already carry `lang=`.
///
/// Works on the raw attribute string a page template prints inside
/// `<html ...>`, so `xml:lang=` also counts as present. An empty language
/// leaves the string unchanged.
pub fn ensure_lang_attr(attributes: &str, language: &str) -> String {
    if attributes.contains("lang=") || language.is_empty() {
        return attributes.to_string();
    }
    format!("{} lang=\"{}\"", attributes, escape_attr(language))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
