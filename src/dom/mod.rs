// SPDX-License-Identifier: PMPL-1.0-or-later
//! Arena-backed HTML document model.
//!
//! Markup is parsed by the html5ever tree builder (through `scraper`), which
//! applies HTML5 error recovery: unclosed tags are closed, stray end tags are
//! dropped and unknown entities stay as text. The parsed tree is then copied
//! into an arena owned by [`Document`]. Nodes point at each other with
//! [`NodeId`] indices, so a parent link is only a back-index into the same
//! arena and never owns anything.

mod serialize;

pub use serialize::{truncate_chars, SNIPPET_LIMIT};

use scraper::Html;
use std::cell::OnceCell;
use std::collections::HashMap;
use tracing::debug;

/// Index of a node inside its owning [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// The document node every tree hangs from
const ROOT: NodeId = NodeId(0);

/// Tag name and attributes of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element with no attributes. The name is lower-cased.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Attributes arrive in source order; the `deterministic` scraper
    /// feature backs them with an insertion-ordered map.
    fn from_parsed(element: &scraper::node::Element) -> Self {
        let mut data = Self::new(element.name());
        for (name, value) in element.attrs() {
            data.attrs.push((name.to_ascii_lowercase(), value.to_string()));
        }
        data
    }

    /// Lower-cased tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by case-insensitive name. The last occurrence wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present, with any value
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attributes in source order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().rev().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The arena root
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// An element
    Element(ElementData),
    /// Character data
    Text(String),
    /// `<!-- comment -->`
    Comment(String),
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl Node {
    /// Parent index, `None` for the root and for detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child indices in document order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Element payload, if this node is an element
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Whether the tree came from a full page or a content fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A page; `html`, `head` and `body` always exist after parsing
    Page,
    /// Body-context content; serialization emits only the fragment itself
    Fragment,
}

/// A parsed HTML tree. Owns every node it contains.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    kind: DocumentKind,
    ids: OnceCell<HashMap<String, NodeId>>,
}

impl Document {
    fn empty(kind: DocumentKind) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            kind,
            ids: OnceCell::new(),
        }
    }

    /// Parse a complete page. Never fails; malformed markup is recovered.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let document = Self::from_parsed(&parsed, DocumentKind::Page);
        debug!(
            nodes = document.len(),
            recovered_errors = parsed.errors.len(),
            "Parsed HTML document"
        );
        document
    }

    /// Parse content as it would appear inside `<body>`.
    ///
    /// The parser's wrapper element is not part of the resulting tree, so
    /// [`Document::to_html`] returns only the fragment's own markup.
    pub fn parse_fragment(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let document = Self::from_parsed(&parsed, DocumentKind::Fragment);
        debug!(nodes = document.len(), "Parsed HTML fragment");
        document
    }

    fn from_parsed(parsed: &Html, kind: DocumentKind) -> Self {
        let mut document = Self::empty(kind);

        let top = match kind {
            DocumentKind::Page => parsed.tree.root(),
            DocumentKind::Fragment => *parsed.root_element(),
        };

        let first: Vec<_> = top.children().collect();
        let mut stack: Vec<_> = first.into_iter().rev().map(|child| (child, ROOT)).collect();

        while let Some((source, parent)) = stack.pop() {
            let data = match source.value() {
                scraper::Node::Element(el) => NodeData::Element(ElementData::from_parsed(el)),
                scraper::Node::Text(text) => NodeData::Text(String::from(&**text)),
                scraper::Node::Comment(comment) => NodeData::Comment(String::from(&**comment)),
                scraper::Node::Doctype(doctype) => NodeData::Doctype(doctype.name().to_string()),
                _ => continue,
            };

            let id = document.push(data);
            document.attach(parent, id);

            let children: Vec<_> = source.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, id)));
        }

        document
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// The arena root (a [`NodeData::Document`] node)
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT.0].children.is_empty()
    }

    /// Node by index.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Element payload of a node, `None` for non-elements
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).as_element()
    }

    /// Lower-cased tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::name)
    }

    /// Whether the node is an element with the given tag name
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    /// Attribute value of an element node
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Whether the attribute is present with exactly this value
    pub fn attr_is(&self, id: NodeId, name: &str, value: &str) -> bool {
        self.attr(id, name) == Some(value)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub(crate) fn id_index(&self) -> &HashMap<String, NodeId> {
        self.ids.get_or_init(|| {
            let mut index = HashMap::new();
            for node in self.elements() {
                if let Some(id) = self.attr(node, "id") {
                    index.entry(id.to_string()).or_insert(node);
                }
            }
            index
        })
    }

    // ---------------------------------------------------------------------
    // Mutation (auto-fix path only)
    // ---------------------------------------------------------------------

    /// Create a detached element. Attach it with [`Document::insert_before`]
    /// or [`Document::append_child`].
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut element = ElementData::new(name);
        for (key, value) in attrs {
            element.set_attr(key, value);
        }
        self.push(NodeData::Element(element))
    }

    /// Append a text node to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(NodeData::Text(text.to_string()));
        self.attach(parent, id);
        id
    }

    /// Move `node` to be the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) {
        self.detach(node);
        self.attach(parent, node);
        self.ids.take();
    }

    /// Move `node` to sit immediately before `reference`.
    ///
    /// Returns `false` and leaves the tree untouched when `reference` has no
    /// parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> bool {
        if reference == node || self.parent(reference).is_none() {
            return false;
        }
        self.detach(node);

        let Some(parent) = self.parent(reference) else {
            return false;
        };
        let siblings = &mut self.nodes[parent.0].children;
        let position = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(position, node);
        self.nodes[node.0].parent = Some(parent);
        self.ids.take();
        true
    }

    /// Set an attribute on an element node. Returns `false` for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => {
                el.set_attr(name, value);
                if name.eq_ignore_ascii_case("id") {
                    self.ids.take();
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_implied_structure() {
        let doc = Document::parse("<p>Hello");
        assert_eq!(doc.kind(), DocumentKind::Page);
        assert!(doc.first_by_tag("html").is_some());
        assert!(doc.first_by_tag("head").is_some());
        assert!(doc.first_by_tag("body").is_some());
        let p = doc.first_by_tag("p").expect("p element");
        assert_eq!(doc.trimmed_text(p), "Hello");
    }

    #[test]
    fn test_malformed_markup_recovers() {
        let doc = Document::parse("<div><span>open <b>bold</div><p>after &bogus; entity");
        let p = doc.first_by_tag("p").expect("p element");
        assert_eq!(doc.trimmed_text(p), "after &bogus; entity");
        assert!(doc.first_by_tag("b").is_some());
    }

    #[test]
    fn test_tag_and_attribute_names_are_lowercased() {
        let doc = Document::parse(r#"<IMG SRC="a.png" Alt="Logo">"#);
        let img = doc.first_by_tag("img").expect("img element");
        assert_eq!(doc.tag_name(img), Some("img"));
        assert_eq!(doc.attr(img, "alt"), Some("Logo"));
        assert_eq!(doc.attr(img, "ALT"), Some("Logo"));
    }

    #[test]
    fn test_parent_back_reference() {
        let doc = Document::parse("<ul><li><a href='#'>x</a></li></ul>");
        let a = doc.first_by_tag("a").expect("a element");
        let li = doc.parent(a).expect("parent");
        assert!(doc.is_tag(li, "li"));
        assert!(doc.children(li).contains(&a));
    }

    #[test]
    fn test_fragment_has_no_wrapper() {
        let doc = Document::parse_fragment("<p>One</p><p>Two</p>");
        assert_eq!(doc.kind(), DocumentKind::Fragment);
        assert!(doc.first_by_tag("html").is_none());
        assert_eq!(doc.element_children(doc.root()).count(), 2);
    }

    #[test]
    fn test_insert_before_and_set_attr() {
        let mut doc = Document::parse_fragment(r#"<input name="q">"#);
        let input = doc.first_by_tag("input").expect("input");
        let label = doc.create_element("label", &[("for", "q-field")]);
        doc.append_text(label, "Search");
        assert!(doc.insert_before(input, label));
        assert!(doc.set_attr(input, "id", "q-field"));

        assert_eq!(doc.parent(label), doc.parent(input));
        assert_eq!(doc.element_by_id("q-field"), Some(input));
        assert_eq!(
            doc.to_html(),
            r#"<label for="q-field">Search</label><input name="q" id="q-field">"#
        );
    }

    #[test]
    fn test_set_attr_replaces_existing_value() {
        let mut el = ElementData::new("DIV");
        el.set_attr("Class", "a");
        el.set_attr("class", "b");
        assert_eq!(el.name(), "div");
        assert_eq!(el.attrs().count(), 1);
        assert_eq!(el.attr("class"), Some("b"));
    }
}
