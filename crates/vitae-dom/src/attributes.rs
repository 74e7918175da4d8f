//! Element Attributes
//!
//! Insertion-ordered attribute collection with optional per-attribute
//! namespace. Order is observable: serialization walks the map in the
//! order attributes were first set.

use std::collections::HashMap;

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
    pub namespace: Option<String>,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(
        name: impl Into<String>,
        value: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: Some(namespace.into()),
        }
    }
}

/// Attribute collection keyed by name, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct AttrMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute by name
    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.by_name.get(name).and_then(|&i| self.attributes.get(i))
    }

    /// Get attribute value by name
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|a| a.value.as_str())
    }

    /// Insert or overwrite an attribute, returning the previous entry.
    /// Overwriting keeps the original insertion position.
    pub fn set(&mut self, attr: Attr) -> Option<Attr> {
        if let Some(&index) = self.by_name.get(&attr.name) {
            Some(std::mem::replace(&mut self.attributes[index], attr))
        } else {
            let index = self.attributes.len();
            self.by_name.insert(attr.name.clone(), index);
            self.attributes.push(attr);
            None
        }
    }

    /// Iterate attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

impl FromIterator<Attr> for AttrMap {
    fn from_iter<T: IntoIterator<Item = Attr>>(iter: T) -> Self {
        let mut map = Self::new();
        for attr in iter {
            map.set(attr);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved() {
        let mut map = AttrMap::new();
        map.set(Attr::new("class", "x"));
        map.set(Attr::new("id", "y"));
        map.set(Attr::new("title", "z"));

        let names: Vec<_> = map.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["class", "id", "title"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut map = AttrMap::new();
        map.set(Attr::new("class", "x"));
        map.set(Attr::new("id", "y"));
        let old = map.set(Attr::new("class", "z"));

        assert_eq!(old.map(|a| a.value), Some("x".to_string()));
        assert_eq!(map.get_value("class"), Some("z"));
        let names: Vec<_> = map.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["class", "id"]);
    }
}
