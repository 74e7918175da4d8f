//! Element Kinds
//!
//! The closed set of tags the composer knows how to build. SVG membership
//! decides creation/attribute namespace; the void set decides self-closing
//! string rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recognized element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    // HTML
    Section,
    Header,
    Div,
    Span,
    Button,
    Time,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    A,
    B,
    P,
    Img,
    Br,
    Hr,
    Input,
    Meta,
    Link,
    Table,
    Tr,
    Td,
    Th,
    Thead,
    Tbody,
    // SVG
    Svg,
    Path,
    Rect,
    Circle,
    Line,
    Polyline,
    Polygon,
    G,
    Text,
}

impl Tag {
    /// Tag name as it appears in markup
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Header => "header",
            Self::Div => "div",
            Self::Span => "span",
            Self::Button => "button",
            Self::Time => "time",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::A => "a",
            Self::B => "b",
            Self::P => "p",
            Self::Img => "img",
            Self::Br => "br",
            Self::Hr => "hr",
            Self::Input => "input",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Table => "table",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Th => "th",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Svg => "svg",
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::G => "g",
            Self::Text => "text",
        }
    }

    /// Whether this tag belongs to the SVG namespace set
    pub fn is_svg(self) -> bool {
        matches!(
            self,
            Self::Svg
                | Self::Path
                | Self::Rect
                | Self::Circle
                | Self::Line
                | Self::Polyline
                | Self::Polygon
                | Self::G
                | Self::Text
        )
    }

    /// Whether this tag renders as a void element (no closing tag)
    pub fn is_self_closing(self) -> bool {
        matches!(
            self,
            Self::Br | Self::Hr | Self::Img | Self::Input | Self::Link | Self::Meta
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tag name
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized element kind: {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| UnknownTag(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_sets() {
        assert!(Tag::Svg.is_svg());
        assert!(Tag::Path.is_svg());
        assert!(!Tag::Div.is_svg());
        assert!(Tag::Br.is_self_closing());
        assert!(Tag::Img.is_self_closing());
        assert!(!Tag::Svg.is_self_closing());
        assert!(!Tag::Span.is_self_closing());
    }

    #[test]
    fn parse_round_trips_names() {
        for tag in [Tag::Section, Tag::H3, Tag::Thead, Tag::Polyline, Tag::Text] {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
        assert!("blink".parse::<Tag>().is_err());
    }
}
