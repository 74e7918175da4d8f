//! vitae DOM - Live document tree
//!
//! Arena-backed tree the composer materializes into, plus the delegated
//! event attachment pass that consumes the `data-event-*` convention.

mod attributes;
mod delegate;
mod events;
mod node;
mod tree;

pub use attributes::{Attr, AttrMap};
pub use delegate::{attach_delegated_events, HandlerResolver, DATA_EVENT_PREFIX};
pub use events::{EventContext, Handler};
pub use node::{ElementData, Node, NodeData, TextData};
pub use tree::{DomError, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id refers to a node
    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

/// SVG element namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Xlink attribute namespace URI
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
