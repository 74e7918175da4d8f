//! Event Listeners
//!
//! Per-(node, event) callback table plus bubbling dispatch. Handlers only
//! observe the tree; mutation happens through state they capture.

use std::rc::Rc;

use crate::{DomTree, NodeId};

/// Event callback
pub type Handler = Rc<dyn Fn(&EventContext)>;

/// What a handler sees when it fires
pub struct EventContext<'a> {
    pub tree: &'a DomTree,
    /// Event name ("click", "change", ...)
    pub event: &'a str,
    /// Node the event originated on
    pub target: NodeId,
    /// Node whose listener is currently running
    pub current: NodeId,
}

impl DomTree {
    /// Attach a listener for `event` on `id`, replacing any previous one
    /// for the same (node, event) pair.
    pub fn add_event_listener(&mut self, id: NodeId, event: &str, handler: Handler) {
        self.listeners.insert((id, event.to_string()), handler);
    }

    /// Whether a listener is attached for `event` on `id`
    pub fn has_listener(&self, id: NodeId, event: &str) -> bool {
        self.listeners.contains_key(&(id, event.to_string()))
    }

    /// Fire `event` at `target` and bubble through its ancestors, invoking
    /// every listener on the path in inner-to-outer order.
    pub fn dispatch(&self, target: NodeId, event: &str) {
        let mut path = Vec::new();
        let mut cur = target;
        while cur.is_some() {
            path.push(cur);
            cur = match self.get(cur) {
                Some(node) => node.parent,
                None => break,
            };
        }

        for current in path {
            let handler = self
                .listeners
                .get(&(current, event.to_string()))
                .map(Rc::clone);
            if let Some(handler) = handler {
                handler(&EventContext {
                    tree: self,
                    event,
                    target,
                    current,
                });
            }
        }
    }
}
