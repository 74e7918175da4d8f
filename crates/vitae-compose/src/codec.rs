//! Serialization Codec
//!
//! Maps a composer tree to a plain JSON form safe to hand across the
//! worker boundary, and back. Live handlers are inherently
//! non-transferable and never cross. Decoding fills defaults for every
//! absent optional field and recovers per child: one corrupt subtree
//! becomes a visible placeholder instead of aborting the document.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::attrs::Attributes;
use crate::composer::{Composer, Content, EventBinding};
use crate::tag::Tag;

/// Codec failures (whole-payload only; child corruption degrades in place)
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed composer payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Serialize for Composer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Composer", 6)?;
        state.serialize_field("tag", &self.tag())?;
        state.serialize_field("svg_scoped", &self.is_svg_scoped())?;
        state.serialize_field("attributes", self.attributes())?;
        state.serialize_field("content", self.content())?;
        state.serialize_field("events", self.events())?;
        state.serialize_field("children", self.children())?;
        state.end()
    }
}

/// Decoded shape with every optional field defaulted in one place.
/// Children stay raw so each can be recovered independently.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawComposer {
    tag: Option<Tag>,
    svg_scoped: bool,
    attributes: Attributes,
    content: Content,
    events: Vec<EventBinding>,
    children: Vec<serde_json::Value>,
}

impl Composer {
    /// Reconstruct a tree from its plain JSON form. A child that fails to
    /// reconstruct is replaced by a visibly marked placeholder span;
    /// siblings and their order are unaffected.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CodecError> {
        let raw: RawComposer = serde_json::from_value(value)?;
        let children = raw
            .children
            .into_iter()
            .map(|child| match Composer::from_value(child) {
                Ok(child) => child,
                Err(error) => {
                    tracing::error!(%error, "failed to reconstruct child node; placeholder substituted");
                    Composer::new(Tag::Span)
                        .set_inner_text(&format!("[Error parsing child: {error}]"))
                }
            })
            .collect();
        Ok(Composer::from_parts(
            raw.tag,
            raw.svg_scoped,
            raw.attributes,
            raw.content,
            raw.events,
            children,
        ))
    }
}

impl<'de> Deserialize<'de> for Composer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Composer::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Encode a tree to its JSON wire form
pub fn encode(composer: &Composer) -> Result<String, CodecError> {
    Ok(serde_json::to_string(composer)?)
}

/// Decode a tree from its JSON wire form
pub fn decode(payload: &str) -> Result<Composer, CodecError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    Composer::from_value(value)
}
