/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Free-text cleanup and inline markup substitution.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{Element, Node};
use crate::ProcessorError;

/// Presence of this character switches [`fixup_text`] to the markup path.
pub const MARKUP_DELIMITER: char = '<';

/// Tag of the gloss element produced by [`patch_braces`].
pub const GLOSS_TAG: &str = "english";

/// Tag of the inline span wrapping brace-delimited text.
pub const UNTRANSLATABLE_TAG: &str = "untranslatable";

/// Synthetic root wrapped around fragments so they parse as one document.
const FRAGMENT_ROOT: &str = "fragment";

// Innermost pair only: the first `}` closes the nearest preceding `{`.
static BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

static VOID_ELEMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(br|hr|img|wbr)\b[^>]*>").unwrap());

static VOID_END_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:br|hr|img|wbr)\s*>").unwrap());

// `<o:p>` and `</o:p>` become `<p>` and `</p>`; the prefixes are never declared.
static TAG_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)[A-Za-z][\w.-]*:([A-Za-z])").unwrap());

/// Options for [`fixup_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// Cosmetic wrapper tags removed from fragments; their content is kept.
    pub strip_tags: Vec<String>,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            strip_tags: vec!["p".to_string()],
        }
    }
}

impl SanitizeOptions {
    fn strips(&self, tag: &str) -> bool {
        self.strip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Result of [`fixup_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixed {
    /// Markup-free input: entities decoded, surrounding whitespace trimmed.
    Plain(String),
    /// A parsed fragment with wrapper tags and attributes removed.
    Markup(Vec<Node>),
}

impl Fixed {
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Fixed::Plain(text) => vec![Node::Text(text)],
            Fixed::Markup(nodes) => nodes,
        }
    }

    /// Concatenated text content.
    pub fn text(&self) -> String {
        match self {
            Fixed::Plain(text) => text.clone(),
            Fixed::Markup(nodes) => Element::new(FRAGMENT_ROOT)
                .with_children(nodes.iter().cloned())
                .text(),
        }
    }
}

/// Clean up a free-text column.
///
/// NULL, empty and whitespace-only input is absent. Input without a markup
/// delimiter only has its HTML entities decoded and is trimmed. Anything else
/// is decoded, parsed as a fragment, and stripped of the configured wrapper
/// tags and of every attribute.
pub fn fixup_text(
    raw: Option<&str>,
    options: &SanitizeOptions,
) -> Result<Option<Fixed>, ProcessorError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    if !raw.contains(MARKUP_DELIMITER) {
        let decoded = decode_html_entities(raw);
        let trimmed = decoded.trim();
        return Ok((!trimmed.is_empty()).then(|| Fixed::Plain(trimmed.to_string())));
    }

    let nodes = parse_fragment(&decode_html_entities(raw))?;
    let nodes = strip_wrappers(nodes, options);
    if is_blank(&nodes) {
        return Ok(None);
    }
    Ok(Some(Fixed::Markup(nodes)))
}

/// Rewrite every `{...}` span as an untranslatable element and wrap the
/// whole string in a gloss element.
pub fn patch_braces(text: &str) -> Element {
    patch_braces_as(GLOSS_TAG, text)
}

/// [`patch_braces`] with a caller-chosen gloss tag.
pub fn patch_braces_as(tag: &str, text: &str) -> Element {
    let mut gloss = Element::new(tag);
    let mut last = 0;
    for caps in BRACES.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            gloss.push(&text[last..whole.start()]);
        }
        gloss.push(Element::text_element(UNTRANSLATABLE_TAG, inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        gloss.push(&text[last..]);
    }
    gloss
}

/// Make decoded HTML acceptable to an XML parser.
///
/// After entity decoding every `&`, and every `<` that cannot open a tag, is
/// literal text. Void elements are self-closed and their stray end tags
/// dropped. Namespace prefixes on tag names are removed.
fn to_well_formed(decoded: &str) -> String {
    let escaped = escape_stray_angles(&decoded.replace('&', "&amp;"));
    let without_end_tags = VOID_END_TAGS.replace_all(&escaped, "");
    let closed = VOID_ELEMENTS.replace_all(&without_end_tags, "<$1/>");
    TAG_PREFIX.replace_all(&closed, "<$1$2").into_owned()
}

/// Escape each `<` not followed by a tag name, `/`, `!` or `?`.
fn escape_stray_angles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let opens_markup = chars
            .peek()
            .is_some_and(|&next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'));
        if c == '<' && !opens_markup {
            out.push_str("&lt;");
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_fragment(decoded: &str) -> Result<Vec<Node>, ProcessorError> {
    let wrapped = format!(
        "<{FRAGMENT_ROOT}>{}</{FRAGMENT_ROOT}>",
        to_well_formed(decoded)
    );
    let document = roxmltree::Document::parse(&wrapped).map_err(|e| ProcessorError::Markup {
        message: e.to_string(),
        fragment: decoded.to_string(),
    })?;
    Ok(document
        .root_element()
        .children()
        .filter_map(convert)
        .collect())
}

/// Copy a parsed node into the owned tree. Attributes, comments and
/// processing instructions are dropped.
fn convert(node: roxmltree::Node) -> Option<Node> {
    if node.is_element() {
        let element = Element::new(node.tag_name().name())
            .with_children(node.children().filter_map(convert));
        Some(Node::Element(element))
    } else if node.is_text() {
        node.text().map(|text| Node::Text(text.to_string()))
    } else {
        None
    }
}

/// Hoist the content of wrapper elements into their parent, at every depth,
/// then merge the text nodes that end up adjacent.
fn strip_wrappers(nodes: Vec<Node>, options: &SanitizeOptions) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Element(mut element) => {
                let children = strip_wrappers(std::mem::take(&mut element.children), options);
                if options.strips(&element.name) {
                    for child in children {
                        push_merged(&mut out, child);
                    }
                } else {
                    element.children = children;
                    out.push(Node::Element(element));
                }
            }
            text => push_merged(&mut out, text),
        }
    }
    out
}

fn push_merged(out: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node {
        if let Some(Node::Text(previous)) = out.last_mut() {
            previous.push_str(text);
            return;
        }
    }
    out.push(node);
}

fn is_blank(nodes: &[Node]) -> bool {
    nodes.iter().all(|node| match node {
        Node::Text(text) => text.trim().is_empty(),
        Node::Element(_) => false,
    })
}
