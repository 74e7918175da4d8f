//! Element Composer
//!
//! Construction only through the static factories; state is opaque and
//! mutated through the chaining builder operations until the node is
//! handed to a render strategy or the codec. Misuse on fragments is a
//! recorded diagnostic, never an error: one bad call must not take down
//! page assembly.

use std::fmt;

use serde::{Deserialize, Serialize};
use vitae_dom::{Handler, XLINK_NAMESPACE};

use crate::attrs::{AttrValue, Attributes};
use crate::tag::Tag;

/// Mutually exclusive text-or-markup content. The last setter called wins
/// and clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub inner_text: String,
    pub inner_html: String,
}

impl Content {
    pub fn is_empty(&self) -> bool {
        self.inner_text.is_empty() && self.inner_html.is_empty()
    }
}

/// Serializable event binding: the alias is the key the delegation pass
/// resolves back to a handler after the tree crosses the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    pub event: String,
    pub alias: String,
}

/// Structured record of a no-op builder call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `set_attribute` on a fragment
    FragmentAttribute { name: String },
    /// `set_event` on a fragment
    FragmentEvent { event: String },
    /// `set_inner_text` / `set_inner_html` on a fragment
    FragmentContent,
    /// Fragment content discarded because children were appended
    FragmentContentDiscarded,
    /// Event binding dropped: empty alias cannot survive serialization
    MissingAlias { event: String },
}

/// One virtual element (or a tagless grouping fragment)
pub struct Composer {
    tag: Option<Tag>,
    svg_scoped: bool,
    attributes: Attributes,
    content: Content,
    events: Vec<EventBinding>,
    children: Vec<Composer>,
    /// Direct-render only; never serialized
    live_handlers: Vec<(String, Handler)>,
    diagnostics: Vec<Diagnostic>,
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("tag", &self.tag)
            .field("svg_scoped", &self.svg_scoped)
            .field("attributes", &self.attributes)
            .field("content", &self.content)
            .field("events", &self.events)
            .field("children", &self.children)
            .field("live_handlers", &self.live_handlers.len())
            .finish()
    }
}

impl Composer {
    fn empty(tag: Option<Tag>, svg_scoped: bool) -> Self {
        Self {
            tag,
            svg_scoped,
            attributes: Attributes::new(),
            content: Content::default(),
            events: Vec::new(),
            children: Vec::new(),
            live_handlers: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Create a new element node. SVG scoping is computed once here and
    /// never recomputed.
    pub fn new(tag: Tag) -> Self {
        Self::empty(Some(tag), tag.is_svg())
    }

    /// Create a new element node and apply attributes parsed from a raw
    /// `name="value"` string. Lenient: fragments that do not match the
    /// pattern are skipped without error.
    pub fn from_raw_attributes(tag: Tag, raw: &str) -> Self {
        let mut composer = Self::new(tag);
        for (name, value) in scan_raw_attributes(raw) {
            composer = composer.set_attribute(&name, &value);
        }
        composer
    }

    /// Create a tagless grouping node: no attributes, content, or events,
    /// only children; renders as the splice of its children.
    pub fn fragment() -> Self {
        Self::empty(None, false)
    }

    /// Reassemble a node from its decoded parts (codec only)
    pub(crate) fn from_parts(
        tag: Option<Tag>,
        svg_scoped: bool,
        attributes: Attributes,
        content: Content,
        events: Vec<EventBinding>,
        children: Vec<Composer>,
    ) -> Self {
        Self {
            tag,
            svg_scoped,
            attributes,
            content,
            events,
            children,
            live_handlers: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Element kind, None for fragments
    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn is_fragment(&self) -> bool {
        self.tag.is_none()
    }

    /// Whether this node was marked as SVG-namespaced at construction
    pub fn is_svg_scoped(&self) -> bool {
        self.svg_scoped
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn events(&self) -> &[EventBinding] {
        &self.events
    }

    pub(crate) fn live_handlers(&self) -> &[(String, Handler)] {
        &self.live_handlers
    }

    /// Children in render order. Read-only view; internal state cannot be
    /// mutated through it.
    pub fn children(&self) -> &[Composer] {
        &self.children
    }

    /// Diagnostics recorded by no-op builder calls, in call order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain recorded diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn warn_fragment(&mut self, what: &str, diagnostic: Diagnostic) {
        tracing::warn!("{what} called on a fragment; ignored");
        self.diagnostics.push(diagnostic);
    }

    /// Set an attribute. Names are lower-cased on non-SVG nodes; on SVG
    /// nodes case is preserved and `xlink:`-prefixed names carry the xlink
    /// namespace. Overwrites any prior value for the name.
    pub fn set_attribute(mut self, name: &str, value: &str) -> Self {
        if self.tag.is_none() {
            self.warn_fragment(
                "set_attribute",
                Diagnostic::FragmentAttribute { name: name.to_string() },
            );
            return self;
        }
        let attribute_name = if self.svg_scoped {
            name.to_string()
        } else {
            name.to_lowercase()
        };
        let namespace = (self.svg_scoped && name.starts_with("xlink:"))
            .then(|| XLINK_NAMESPACE.to_string());
        self.attributes.set(
            attribute_name,
            AttrValue { value: value.to_string(), namespace },
        );
        self
    }

    /// Record an event binding. The `(event, alias)` pair is deduplicated
    /// and an empty alias is dropped (it could not be reattached after
    /// serialization); the live callback is stored unconditionally for the
    /// direct render strategy, overwriting any previous one for the event.
    pub fn set_event(mut self, event: &str, callback: Handler, alias: &str) -> Self {
        if self.tag.is_none() {
            self.warn_fragment(
                "set_event",
                Diagnostic::FragmentEvent { event: event.to_string() },
            );
            return self;
        }
        let exists = self
            .events
            .iter()
            .any(|b| b.event == event && b.alias == alias);
        if !exists {
            if alias.is_empty() {
                tracing::warn!(
                    event,
                    tag = %self.tag.map(Tag::as_str).unwrap_or(""),
                    "missing alias for event; binding will not survive serialization"
                );
                self.diagnostics
                    .push(Diagnostic::MissingAlias { event: event.to_string() });
            } else {
                self.events.push(EventBinding {
                    event: event.to_string(),
                    alias: alias.to_string(),
                });
            }
        }
        match self.live_handlers.iter_mut().find(|(e, _)| e == event) {
            Some(slot) => slot.1 = callback,
            None => self.live_handlers.push((event.to_string(), callback)),
        }
        self
    }

    /// Set text content, clearing any raw markup content
    pub fn set_inner_text(mut self, text: &str) -> Self {
        if self.tag.is_none() {
            self.warn_fragment("set_inner_text", Diagnostic::FragmentContent);
            return self;
        }
        self.content.inner_text = text.to_string();
        self.content.inner_html.clear();
        self
    }

    /// Set raw markup content, clearing any text content. The markup is
    /// caller-trusted and is never escaped.
    pub fn set_inner_html(mut self, html: &str) -> Self {
        if self.tag.is_none() {
            self.warn_fragment("set_inner_html", Diagnostic::FragmentContent);
            return self;
        }
        self.content.inner_html = html.to_string();
        self.content.inner_text.clear();
        self
    }

    fn discard_fragment_content(&mut self) {
        if self.tag.is_none() && !self.content.is_empty() {
            tracing::warn!("fragment had content set before children; content discarded");
            self.content = Content::default();
            self.diagnostics.push(Diagnostic::FragmentContentDiscarded);
        }
    }

    /// Append one child
    pub fn append_child(mut self, child: Composer) -> Self {
        self.discard_fragment_content();
        self.children.push(child);
        self
    }

    /// Append children in order
    pub fn append_children(mut self, children: impl IntoIterator<Item = Composer>) -> Self {
        self.discard_fragment_content();
        self.children.extend(children);
        self
    }
}

/// Best-effort scan for `name="value"` / `name='value'` pairs. Names are
/// runs of word, hyphen, or colon characters; a value runs to the next
/// quote of either kind. Anything else is skipped.
fn scan_raw_attributes(raw: &str) -> Vec<(String, String)> {
    fn is_name_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '-' || c == ':'
    }

    let mut pairs = Vec::new();
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !is_name_char(chars[i]) {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        let name: String = chars[name_start..i].iter().collect();
        if i + 1 < chars.len() && chars[i] == '=' && (chars[i + 1] == '"' || chars[i + 1] == '\'') {
            let value_start = i + 2;
            match chars[value_start..].iter().position(|&c| c == '"' || c == '\'') {
                Some(len) => {
                    pairs.push((name, chars[value_start..value_start + len].iter().collect()));
                    i = value_start + len + 1;
                }
                // Unterminated value: nothing further can match
                None => break,
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn svg_scoping_computed_at_construction() {
        assert!(Composer::new(Tag::Svg).is_svg_scoped());
        assert!(Composer::new(Tag::Path).is_svg_scoped());
        assert!(!Composer::new(Tag::Div).is_svg_scoped());
        assert!(!Composer::fragment().is_svg_scoped());
    }

    #[test]
    fn attribute_names_lowercased_unless_svg() {
        let div = Composer::new(Tag::Div).set_attribute("CLASS", "x");
        assert_eq!(div.attributes().get("class").map(|a| a.value.as_str()), Some("x"));

        let svg = Composer::new(Tag::Svg).set_attribute("viewBox", "0 0 24 24");
        assert!(svg.attributes().get("viewBox").is_some());
        assert!(svg.attributes().get("viewbox").is_none());
    }

    #[test]
    fn xlink_namespace_only_on_svg_nodes() {
        let svg = Composer::new(Tag::Svg).set_attribute("xlink:href", "#icon");
        assert_eq!(
            svg.attributes().get("xlink:href").and_then(|a| a.namespace.as_deref()),
            Some(XLINK_NAMESPACE)
        );

        let div = Composer::new(Tag::Div).set_attribute("xlink:href", "#icon");
        assert_eq!(
            div.attributes().get("xlink:href").and_then(|a| a.namespace.as_deref()),
            None
        );
    }

    #[test]
    fn content_setters_are_mutually_exclusive() {
        let node = Composer::new(Tag::P)
            .set_inner_text("text")
            .set_inner_html("<b>html</b>");
        assert_eq!(node.content().inner_text, "");
        assert_eq!(node.content().inner_html, "<b>html</b>");

        let node = node.set_inner_text("again");
        assert_eq!(node.content().inner_text, "again");
        assert_eq!(node.content().inner_html, "");
    }

    #[test]
    fn fragment_mutation_is_a_diagnosed_noop() {
        let noop: Handler = Rc::new(|_| {});
        let fragment = Composer::fragment()
            .set_attribute("class", "x")
            .set_event("click", noop, "alias")
            .set_inner_text("text")
            .set_inner_html("<b>html</b>");

        assert!(fragment.attributes().is_empty());
        assert!(fragment.events().is_empty());
        assert!(fragment.content().is_empty());
        assert_eq!(
            fragment.diagnostics(),
            &[
                Diagnostic::FragmentAttribute { name: "class".into() },
                Diagnostic::FragmentEvent { event: "click".into() },
                Diagnostic::FragmentContent,
                Diagnostic::FragmentContent,
            ]
        );
    }

    #[test]
    fn event_bindings_dedup_and_require_alias() {
        let noop: Handler = Rc::new(|_| {});
        let node = Composer::new(Tag::Button)
            .set_event("click", Rc::clone(&noop), "fold")
            .set_event("click", Rc::clone(&noop), "fold")
            .set_event("click", Rc::clone(&noop), "other")
            .set_event("change", noop, "");

        assert_eq!(
            node.events(),
            &[
                EventBinding { event: "click".into(), alias: "fold".into() },
                EventBinding { event: "click".into(), alias: "other".into() },
            ]
        );
        assert_eq!(node.diagnostics(), &[Diagnostic::MissingAlias { event: "change".into() }]);
        // Live handler stored once per event name regardless of alias churn.
        assert_eq!(node.live_handlers().len(), 2);
    }

    #[test]
    fn raw_attribute_scan_is_lenient() {
        let node = Composer::from_raw_attributes(
            Tag::Svg,
            r#"xmlns="http://www.w3.org/2000/svg" width='24' malformed= viewBox="0 0 24 20""#,
        );
        assert_eq!(
            node.attributes().get("xmlns").map(|a| a.value.as_str()),
            Some("http://www.w3.org/2000/svg")
        );
        assert_eq!(node.attributes().get("width").map(|a| a.value.as_str()), Some("24"));
        assert_eq!(
            node.attributes().get("viewBox").map(|a| a.value.as_str()),
            Some("0 0 24 20")
        );
        assert!(node.attributes().get("malformed").is_none());
    }

    #[test]
    fn children_preserve_append_order() {
        let node = Composer::new(Tag::Div)
            .append_child(Composer::new(Tag::Span))
            .append_children([Composer::new(Tag::P), Composer::new(Tag::B)]);
        let tags: Vec<_> = node.children().iter().filter_map(|c| c.tag()).collect();
        assert_eq!(tags, [Tag::Span, Tag::P, Tag::B]);
    }
}
