//! DOM Node
//!
//! Sibling-linked node records; the tree arena owns them and wires the
//! links. `NodeData` carries the per-kind payload.

use crate::{AttrMap, NodeId};

/// One node record in the arena
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Grouping container with no markup of its own
    Fragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element payload
#[derive(Debug)]
pub struct ElementData {
    /// Tag name
    pub name: String,
    /// Creation namespace (SVG elements), None for HTML
    pub namespace: Option<String>,
    /// Attributes
    pub attrs: AttrMap,
    /// Caller-trusted raw markup content, set instead of text children
    pub raw_html: Option<String>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attrs: AttrMap::new(),
            raw_html: None,
        }
    }

    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            attrs: AttrMap::new(),
            raw_html: None,
        }
    }
}

/// Text payload
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}
