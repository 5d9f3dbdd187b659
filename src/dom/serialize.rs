// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML serialization for [`Document`] nodes.

use super::{Document, ElementData, NodeData, NodeId};

/// Maximum length, in characters, of an element snippet attached to a finding
pub const SNIPPET_LIMIT: usize = 500;

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Cut a string down to at most `limit` characters
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

impl Document {
    /// Markup of a node including its own tags
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Markup of a node's children
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Markup of the whole tree. For fragments this is just the fragment
    /// content, without any parser wrapper.
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    /// Start tag of an element, e.g. `<html dir="ltr">`. Empty for non-elements.
    pub fn start_tag(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(el) = self.element(node) {
            write_start_tag(el, &mut out);
        }
        out
    }

    /// Outer HTML cut to [`SNIPPET_LIMIT`] characters
    pub fn snippet(&self, node: NodeId) -> String {
        truncate_chars(&self.outer_html(node), SNIPPET_LIMIT)
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let mut stack = vec![Step::Enter(node)];

        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Leave(id) => {
                    if let Some(el) = self.element(id) {
                        out.push_str("</");
                        out.push_str(el.name());
                        out.push('>');
                    }
                    continue;
                }
                Step::Enter(id) => id,
            };

            match self.node(id).data() {
                NodeData::Document => {
                    stack.extend(self.children(id).iter().rev().map(|&c| Step::Enter(c)));
                }
                NodeData::Doctype(name) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(name);
                    out.push('>');
                }
                NodeData::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                NodeData::Text(text) => {
                    if self.in_raw_text_element(id) {
                        out.push_str(text);
                    } else {
                        escape_into(text, false, out);
                    }
                }
                NodeData::Element(el) => {
                    write_start_tag(el, out);
                    if !VOID_ELEMENTS.contains(&el.name()) {
                        stack.push(Step::Leave(id));
                        stack.extend(self.children(id).iter().rev().map(|&c| Step::Enter(c)));
                    }
                }
            }
        }
    }

    fn in_raw_text_element(&self, text_node: NodeId) -> bool {
        self.parent(text_node)
            .and_then(|p| self.tag_name(p))
            .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name))
    }
}

fn write_start_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(el.name());
    for (name, value) in el.attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_into(text: &str, attr_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attr_mode => out.push_str("&quot;"),
            '<' if !attr_mode => out.push_str("&lt;"),
            '>' if !attr_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_tags_and_attributes() {
        let html = r#"<section id="main" class="a b"><a href="/x?a=1&amp;b=2" title="Say &quot;hi&quot;">Link</a><img src="p.png" alt=""></section>"#;
        let doc = Document::parse_fragment(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = Document::parse_fragment("<p>1 &lt; 2 &amp;&amp; 3 &gt; 2&nbsp;ok</p>");
        assert_eq!(doc.to_html(), "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2&nbsp;ok</p>");
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let doc = Document::parse("<style>a > b { color: red; }</style>");
        let style = doc.first_by_tag("style").expect("style element");
        assert_eq!(doc.outer_html(style), "<style>a > b { color: red; }</style>");
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let doc = Document::parse_fragment(r#"<br><input type="text"><hr>"#);
        assert_eq!(doc.to_html(), r#"<br><input type="text"><hr>"#);
    }

    #[test]
    fn test_start_tag_and_comment() {
        let doc = Document::parse(r#"<!DOCTYPE html><html dir="ltr"><!-- note --><body></body></html>"#);
        let html = doc.first_by_tag("html").expect("html element");
        assert_eq!(doc.start_tag(html), r#"<html dir="ltr">"#);
        assert!(doc.to_html().starts_with("<!DOCTYPE html><html dir=\"ltr\"><!-- note -->"));
    }

    #[test]
    fn test_snippet_is_truncated() {
        let long = "x".repeat(SNIPPET_LIMIT * 2);
        let doc = Document::parse_fragment(&format!("<p>{}</p>", long));
        let p = doc.first_by_tag("p").expect("p element");
        assert_eq!(doc.snippet(p).chars().count(), SNIPPET_LIMIT);
        assert!(doc.snippet(p).starts_with("<p>xxx"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
