//! Direct Render Strategy
//!
//! Materializes a composer tree into a live [`DomTree`]: real elements,
//! namespaced creation and attribute setting for SVG nodes, live listener
//! attachment. A child that fails to materialize is replaced in position
//! by a visibly marked error span; the parent keeps going.

use vitae_dom::{DomError, DomTree, NodeId, SVG_NAMESPACE};

use crate::composer::Composer;

impl Composer {
    /// Materialize this tree into `tree`, returning the root of the new
    /// subtree. Fails only when the node itself cannot be created; child
    /// failures degrade to placeholders.
    pub fn materialize(&self, tree: &mut DomTree) -> Result<NodeId, DomError> {
        let id = match self.tag() {
            None => tree.create_fragment()?,
            Some(tag) if self.is_svg_scoped() => {
                tree.create_element_ns(SVG_NAMESPACE, tag.as_str())?
            }
            Some(tag) => tree.create_element(tag.as_str())?,
        };

        for (name, attr) in self.attributes().iter() {
            match &attr.namespace {
                Some(ns) => tree.set_attribute_ns(id, ns, name, &attr.value),
                None => tree.set_attribute(id, name, &attr.value),
            }
        }

        // Raw markup wins over text when both are set; the builder's
        // mutual exclusivity normally prevents that state.
        if !self.content().inner_html.is_empty() {
            if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                elem.raw_html = Some(self.content().inner_html.clone());
            }
        } else if !self.content().inner_text.is_empty() {
            let text = tree.create_text(self.content().inner_text.clone())?;
            tree.append_child(id, text);
        }

        for (event, handler) in self.live_handlers() {
            tree.add_event_listener(id, event, handler.clone());
        }

        for child in self.children() {
            match child.materialize(tree) {
                Ok(child_id) => tree.append_child(id, child_id),
                Err(error) => {
                    tracing::error!(%error, "failed to materialize child; placeholder substituted");
                    let placeholder =
                        tree.create_error_placeholder(&format!("[Error rendering child: {error}]"));
                    tree.append_child(id, placeholder);
                }
            }
        }

        Ok(id)
    }
}
