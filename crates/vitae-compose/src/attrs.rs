//! Composer Attributes
//!
//! Name-keyed attribute map that preserves insertion order through
//! serialization; order is the render order of the attribute string.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attribute payload: value plus optional namespace URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrValue {
    pub value: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Insertion-ordered attribute map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
    by_name: HashMap<String, usize>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.by_name.get(name).map(|&i| &self.entries[i].1)
    }

    /// Insert or overwrite; overwriting keeps the original position
    pub fn set(&mut self, name: String, attr: AttrValue) {
        if let Some(&index) = self.by_name.get(&name) {
            self.entries[index].1 = attr;
        } else {
            self.by_name.insert(name.clone(), self.entries.len());
            self.entries.push((name, attr));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, attr) in &self.entries {
            map.serialize_entry(name, attr)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttrVisitor;

        impl<'de> Visitor<'de> for AttrVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute name to value record")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut attrs = Attributes::new();
                while let Some((name, attr)) = access.next_entry::<String, AttrValue>()? {
                    attrs.set(name, attr);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttrVisitor)
    }
}
