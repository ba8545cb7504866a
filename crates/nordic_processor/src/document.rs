/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Owned document tree.
//!
//! Output elements never carry attributes: generated nodes have none and
//! sanitized markup has them removed, so an element is just a name and an
//! ordered list of children.

/// A node in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// A named element with ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// An element holding a single text child. Empty text yields an empty element.
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        let text = text.into();
        if !text.is_empty() {
            element.children.push(Node::Text(text));
        }
        element
    }

    /// Like [`Element::text_element`], but an absent value gives an empty element.
    pub fn optional_text(name: impl Into<String>, text: Option<&str>) -> Self {
        Self::text_element(name, text.unwrap_or_default())
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn with_child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn with_children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(nodes);
        self
    }

    /// Direct child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Whether any direct child is text, i.e. the element has mixed or text content.
    pub fn has_text(&self) -> bool {
        self.children
            .iter()
            .any(|child| matches!(child, Node::Text(_)))
    }

    /// Concatenated text of all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_skips_empty_text() {
        assert!(Element::text_element("name", "").children.is_empty());
        assert!(Element::optional_text("name", None).children.is_empty());
        assert_eq!(Element::optional_text("name", Some("hus")).text(), "hus");
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let gloss = Element::new("english")
            .with_child("see ")
            .with_child(Element::text_element("untranslatable", "foo"))
            .with_child(" also");
        assert_eq!(gloss.text(), "see foo also");
        assert!(gloss.has_text());
        assert_eq!(gloss.child("untranslatable").map(Element::text).as_deref(), Some("foo"));
    }
}
