//! Delegated Event Attachment
//!
//! A subtree rendered from a string carries `data-event-<name>="<alias>"`
//! attributes instead of live listeners. This pass scans the subtree once,
//! installs one delegated listener per distinct event name on the root, and
//! resolves aliases through an injected registry at dispatch time.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::{DomTree, Handler, NodeId};

/// Attribute prefix standing in for event bindings in rendered markup
pub const DATA_EVENT_PREFIX: &str = "data-event-";

/// Alias-to-handler lookup, passed in explicitly so the attachment pass
/// stays testable without process-wide state.
pub trait HandlerResolver {
    fn get_handler(&self, alias: &str) -> Option<Handler>;
}

/// Scan the subtree under `root` for `data-event-*` attributes and install
/// one delegated listener per discovered event name on `root`. Returns the
/// event names that were wired, in sorted order.
pub fn attach_delegated_events(
    tree: &mut DomTree,
    root: NodeId,
    resolver: Rc<dyn HandlerResolver>,
) -> Vec<String> {
    let mut event_names = BTreeSet::new();
    for id in tree.descendants(root) {
        let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
            continue;
        };
        for attr in elem.attrs.iter() {
            if let Some(event) = attr.name.strip_prefix(DATA_EVENT_PREFIX) {
                if !event.is_empty() {
                    event_names.insert(event.to_string());
                }
            }
        }
    }

    for event in &event_names {
        let resolver = Rc::clone(&resolver);
        let event_name = event.clone();
        let handler: Handler = Rc::new(move |ctx| {
            let attr_name = format!("{DATA_EVENT_PREFIX}{event_name}");
            let Some(carrier) = ctx.tree.closest_with_attribute(ctx.target, &attr_name) else {
                return;
            };
            let Some(alias) = ctx.tree.attribute(carrier, &attr_name) else {
                return;
            };
            match resolver.get_handler(alias) {
                Some(callback) => callback(ctx),
                None => {
                    tracing::warn!(alias, event = %event_name, "no handler registered for alias");
                }
            }
        });
        tree.add_event_listener(root, event, handler);
    }

    event_names.into_iter().collect()
}
