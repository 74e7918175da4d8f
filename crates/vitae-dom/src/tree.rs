//! DOM Tree
//!
//! Arena of nodes addressed by `NodeId`. Creation is fallible (the arena
//! carries a node-capacity limit); structural wiring is O(1) append.

use std::collections::HashMap;

use crate::events::Handler;
use crate::node::{ElementData, Node, NodeData, TextData};
use crate::{Attr, NodeId};

/// Tree-level errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomError {
    #[error("node capacity exhausted ({0} nodes)")]
    CapacityExhausted(usize),
}

/// Arena-backed document tree
pub struct DomTree {
    nodes: Vec<Node>,
    capacity_limit: usize,
    pub(crate) listeners: HashMap<(NodeId, String), Handler>,
}

impl std::fmt::Debug for DomTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomTree")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create an empty tree with the default capacity limit
    pub fn new() -> Self {
        Self::with_capacity_limit(u32::MAX as usize - 1)
    }

    /// Create an empty tree that refuses to grow past `limit` nodes
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity_limit: limit,
            listeners: HashMap::new(),
        }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn alloc(&mut self, data: NodeData) -> Result<NodeId, DomError> {
        if self.nodes.len() >= self.capacity_limit {
            return Err(DomError::CapacityExhausted(self.capacity_limit));
        }
        Ok(self.alloc_unchecked(data))
    }

    fn alloc_unchecked(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create an element node in the default (HTML) namespace
    pub fn create_element(&mut self, name: &str) -> Result<NodeId, DomError> {
        self.alloc(NodeData::Element(ElementData::new(name)))
    }

    /// Create an element node in an explicit namespace
    pub fn create_element_ns(&mut self, namespace: &str, name: &str) -> Result<NodeId, DomError> {
        self.alloc(NodeData::Element(ElementData::with_namespace(name, namespace)))
    }

    /// Create a grouping container node
    pub fn create_fragment(&mut self) -> Result<NodeId, DomError> {
        self.alloc(NodeData::Fragment)
    }

    /// Create a text node
    pub fn create_text(&mut self, content: impl Into<String>) -> Result<NodeId, DomError> {
        self.alloc(NodeData::Text(TextData {
            content: content.into(),
        }))
    }

    /// Create a visibly marked error placeholder span. Bypasses the
    /// capacity limit: the degradation path must not be starved by the
    /// limit that triggered it.
    pub fn create_error_placeholder(&mut self, message: &str) -> NodeId {
        let mut elem = ElementData::new("span");
        elem.attrs.set(Attr::new("style", "color: red"));
        let span = self.alloc_unchecked(NodeData::Element(elem));
        let text = self.alloc_unchecked(NodeData::Text(TextData {
            content: message.to_string(),
        }));
        self.append_child(span, text);
        span
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            tracing::warn!(?parent, ?child, "append_child on unknown node, ignoring");
            return;
        }
        let old_last = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
            c.prev_sibling = old_last;
        }
        if old_last.is_some() {
            if let Some(prev) = self.get_mut(old_last) {
                prev.next_sibling = child;
            }
        }
        if let Some(p) = self.get_mut(parent) {
            if !p.first_child.is_some() {
                p.first_child = child;
            }
            p.last_child = child;
        }
    }

    /// Set an attribute on an element node
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.attrs.set(Attr::new(name, value));
        }
    }

    /// Set a namespaced attribute on an element node
    pub fn set_attribute_ns(&mut self, id: NodeId, namespace: &str, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.attrs.set(Attr::with_namespace(name, value, namespace));
        }
    }

    /// Get an attribute value on an element node
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attrs.get_value(name)
    }

    /// Children of a node, in document order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        while cur.is_some() {
            out.push(cur);
            cur = self.get(cur).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        }
        out
    }

    /// All nodes in the subtree rooted at `root`, depth-first, root included
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            let mut rev = self.children(id);
            rev.reverse();
            stack.extend(rev);
        }
        out
    }

    /// Walk ancestor-or-self until a node carries attribute `name`
    pub fn closest_with_attribute(&self, from: NodeId, name: &str) -> Option<NodeId> {
        let mut cur = from;
        while cur.is_some() {
            if self.attribute(cur, name).is_some() {
                return Some(cur);
            }
            cur = self.get(cur)?.parent;
        }
        None
    }

    /// Serialize a subtree to markup. Test/debug aid, not a renderer:
    /// the composer's string strategy is the production serializer.
    pub fn html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.data {
            NodeData::Fragment => {
                for child in self.children(id) {
                    self.write_html(child, out);
                }
            }
            NodeData::Text(t) => out.push_str(&escape(&t.content)),
            NodeData::Element(e) => {
                out.push('<');
                out.push_str(&e.name);
                for attr in e.attrs.iter() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&escape(&attr.value));
                    out.push('"');
                }
                out.push('>');
                if let Some(raw) = &e.raw_html {
                    out.push_str(raw);
                }
                for child in self.children(id) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&e.name);
                out.push('>');
            }
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
