//! vitae Compose - Virtual element composer
//!
//! Builds serializable element trees from typed data. A tree survives the
//! JSON boundary into worker threads and renders either to an HTML string
//! (worker-safe, event bindings become `data-event-*` attributes) or
//! directly into a live [`vitae_dom::DomTree`] with real listeners.
//!
//! # Example
//! ```
//! use vitae_compose::{Composer, Tag};
//!
//! let node = Composer::new(Tag::Div)
//!     .set_attribute("class", "x")
//!     .append_child(Composer::new(Tag::Span).set_inner_text("hi"));
//! assert_eq!(node.to_html_string(), r#"<div class="x"><span>hi</span></div>"#);
//! ```

mod attrs;
mod codec;
mod composer;
mod escape;
mod materialize;
mod render;
mod tag;

pub use attrs::{AttrValue, Attributes};
pub use codec::{decode, encode, CodecError};
pub use composer::{Composer, Content, Diagnostic, EventBinding};
pub use escape::escape_html;
pub use tag::Tag;

/// Attribute name prefix for serialized event bindings in rendered markup
pub use vitae_dom::DATA_EVENT_PREFIX;
