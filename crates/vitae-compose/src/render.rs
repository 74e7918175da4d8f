//! String Render Strategy
//!
//! Worker-safe HTML string generation. Event bindings become
//! `data-event-<name>="<alias>"` attributes for the delegated attachment
//! pass; `inner_html` content is caller-trusted and passes through
//! unescaped.

use crate::composer::Composer;
use crate::escape::escape_html;
use vitae_dom::DATA_EVENT_PREFIX;

impl Composer {
    /// Render this tree to an HTML string. Children render first and
    /// concatenate in append order; a fragment is exactly that
    /// concatenation with no wrapping tag.
    pub fn to_html_string(&self) -> String {
        let children_html: String = self.children().iter().map(Composer::to_html_string).collect();

        let Some(tag) = self.tag() else {
            return children_html;
        };

        let mut attributes = String::new();
        for (name, attr) in self.attributes().iter() {
            attributes.push(' ');
            attributes.push_str(name);
            attributes.push_str("=\"");
            attributes.push_str(&escape_html(&attr.value));
            attributes.push('"');
        }
        for binding in self.events() {
            if binding.alias.is_empty() {
                continue;
            }
            attributes.push(' ');
            attributes.push_str(DATA_EVENT_PREFIX);
            attributes.push_str(&binding.event);
            attributes.push_str("=\"");
            attributes.push_str(&escape_html(&binding.alias));
            attributes.push('"');
        }

        // Void elements take no content or children, even if set.
        if !self.is_svg_scoped() && tag.is_self_closing() {
            return format!("<{tag}{attributes} />");
        }

        let content = if !self.content().inner_html.is_empty() {
            self.content().inner_html.clone()
        } else {
            escape_html(&self.content().inner_text)
        };

        format!("<{tag}{attributes}>{content}{children_html}</{tag}>")
    }
}
