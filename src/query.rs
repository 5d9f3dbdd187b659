// SPDX-License-Identifier: PMPL-1.0-or-later
//! Query layer over [`Document`]: tag and attribute selection, axis
//! traversal and text extraction.
//!
//! Every check is written against these helpers. The only places that read
//! raw text instead are the CSS inspections (`<style>` contents and inline
//! `style` values), since CSS is not part of the element tree.

use crate::dom::{Document, NodeData, NodeId};

/// How many leading element children of `<body>` the skip-link search looks at
pub const BODY_LOOKAHEAD: usize = 10;

/// Strip space, tab, newline, carriage return, NUL and vertical tab from
/// both ends. Non-breaking and other Unicode spaces are kept, so text made
/// only of `&nbsp;` is not blank.
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Whether `text` is empty after [`trim_blank`]
pub fn is_blank(text: &str) -> bool {
    trim_blank(text).is_empty()
}

/// Pre-order iterator over the nodes below a starting node
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator from a node's parent up to the root
pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.document.parent(id);
        Some(id)
    }
}

impl Document {
    /// All nodes below `node` in document order, `node` itself excluded
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: self.children(node).iter().rev().copied().collect(),
        }
    }

    /// Element nodes below `node` in document order
    pub fn descendant_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(node).filter(move |&id| self.element(id).is_some())
    }

    /// Every element of the document in document order
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendant_elements(self.root())
    }

    /// Elements whose tag is one of `tags`, in document order
    pub fn elements_by_tag<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = NodeId> + 'a {
        self.elements().filter(move |&id| tags.iter().any(|t| self.is_tag(id, t)))
    }

    /// Elements below `scope` whose tag is one of `tags`
    pub fn descendants_by_tag<'a>(
        &'a self,
        scope: NodeId,
        tags: &'a [&'a str],
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendant_elements(scope)
            .filter(move |&id| tags.iter().any(|t| self.is_tag(id, t)))
    }

    /// First element with the given tag
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.elements().find(|&id| self.is_tag(id, tag))
    }

    /// Elements carrying the attribute, whatever its value
    pub fn elements_with_attr<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.elements().filter(move |&id| self.has_attr(id, name))
    }

    /// Elements whose attribute equals `value` exactly
    pub fn elements_with_attr_value<'a>(
        &'a self,
        name: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.elements().filter(move |&id| self.attr_is(id, name, value))
    }

    /// Elements whose attribute value contains `needle`
    pub fn elements_with_attr_containing<'a>(
        &'a self,
        name: &'a str,
        needle: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |&id| self.attr(id, name).is_some_and(|v| v.contains(needle)))
    }

    /// Ancestors of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.parent(node),
        }
    }

    /// Whether some ancestor of `node` has the given tag
    pub fn has_ancestor(&self, node: NodeId, tag: &str) -> bool {
        self.ancestors(node).any(|id| self.is_tag(id, tag))
    }

    /// Direct element children of `node`
    pub fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&id| self.element(id).is_some())
    }

    /// The first `limit` element children of `node`
    pub fn first_element_children(
        &self,
        node: NodeId,
        limit: usize,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.element_children(node).take(limit)
    }

    /// The first [`BODY_LOOKAHEAD`] element children of `<body>`
    pub fn leading_body_elements(&self) -> Vec<NodeId> {
        match self.first_by_tag("body") {
            Some(body) => self.first_element_children(body, BODY_LOOKAHEAD).collect(),
            None => Vec::new(),
        }
    }

    /// Concatenated text of all text nodes below `node`
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        if let NodeData::Text(t) = self.node(node).data() {
            text.push_str(t);
        }
        for id in self.descendants(node) {
            if let NodeData::Text(t) = self.node(id).data() {
                text.push_str(t);
            }
        }
        text
    }

    /// Text content with leading and trailing whitespace removed
    pub fn trimmed_text(&self, node: NodeId) -> String {
        trim_blank(&self.text_content(node)).to_string()
    }

    /// Whether the element has no text once whitespace is trimmed
    pub fn is_text_empty(&self, node: NodeId) -> bool {
        is_blank(&self.text_content(node))
    }

    /// First element carrying `id="..."` with this value
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index().get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::parse(
            r##"<html><body>
                <header id="top"><a href="#main">Skip</a></header>
                <nav role="navigation"><ul><li><a href="/a">A</a></li><li><a href="/b">B</a></li></ul></nav>
                <main id="main"><h1>Title</h1><p>  Body text  </p></main>
            </body></html>"##,
        )
    }

    #[test]
    fn test_elements_by_tag_in_document_order() {
        let doc = sample();
        let hrefs: Vec<_> = doc
            .elements_by_tag(&["a"])
            .filter_map(|a| doc.attr(a, "href"))
            .collect();
        assert_eq!(hrefs, vec!["#main", "/a", "/b"]);
    }

    #[test]
    fn test_descendant_scope() {
        let doc = sample();
        let nav = doc.first_by_tag("nav").expect("nav");
        assert_eq!(doc.descendants_by_tag(nav, &["a"]).count(), 2);
        assert_eq!(doc.descendants_by_tag(nav, &["ul", "ol"]).count(), 1);
        assert_eq!(doc.descendants_by_tag(nav, &["h1"]).count(), 0);
    }

    #[test]
    fn test_attribute_selection() {
        let doc = sample();
        assert_eq!(doc.elements_with_attr("id").count(), 2);
        assert_eq!(doc.elements_with_attr_value("role", "navigation").count(), 1);
        assert_eq!(doc.elements_with_attr_containing("href", "/").count(), 2);
    }

    #[test]
    fn test_ancestors() {
        let doc = sample();
        let a = doc.elements_by_tag(&["a"]).nth(1).expect("second link");
        assert!(doc.has_ancestor(a, "nav"));
        assert!(doc.has_ancestor(a, "li"));
        assert!(!doc.has_ancestor(a, "main"));
        assert_eq!(doc.ancestors(a).last(), Some(doc.root()));
    }

    #[test]
    fn test_leading_body_elements() {
        let doc = sample();
        let tags: Vec<_> = doc
            .leading_body_elements()
            .into_iter()
            .filter_map(|id| doc.tag_name(id))
            .collect();
        assert_eq!(tags, vec!["header", "nav", "main"]);
    }

    #[test]
    fn test_lookahead_is_bounded() {
        let body: String = (0..15).map(|i| format!("<div>{}</div>", i)).collect();
        let doc = Document::parse(&body);
        assert_eq!(doc.leading_body_elements().len(), BODY_LOOKAHEAD);
    }

    #[test]
    fn test_text_extraction() {
        let doc = sample();
        let p = doc.first_by_tag("p").expect("p");
        assert_eq!(doc.text_content(p), "  Body text  ");
        assert_eq!(doc.trimmed_text(p), "Body text");
        let main = doc.first_by_tag("main").expect("main");
        assert_eq!(doc.trimmed_text(main), "Title  Body text");
    }

    #[test]
    fn test_only_ascii_whitespace_is_trimmed() {
        assert_eq!(trim_blank(" \t\n\r\x0Bok\0 "), "ok");
        assert_eq!(trim_blank("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
        assert!(is_blank(" \n\t"));
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("\u{2003}"));

        let doc = Document::parse("<h2>&nbsp;</h2><h3> \n </h3>");
        let h2 = doc.first_by_tag("h2").expect("h2");
        let h3 = doc.first_by_tag("h3").expect("h3");
        assert!(!doc.is_text_empty(h2));
        assert!(doc.is_text_empty(h3));
    }

    #[test]
    fn test_element_by_id_first_occurrence() {
        let doc = Document::parse(r#"<p id="x">one</p><p id="x">two</p>"#);
        let found = doc.element_by_id("x").expect("element");
        assert_eq!(doc.trimmed_text(found), "one");
        assert!(doc.element_by_id("missing").is_none());
    }
}
