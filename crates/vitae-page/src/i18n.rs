//! Translation Seam
//!
//! Total translation: an unknown key comes back unchanged, so section
//! builders never deal with missing labels.

use std::collections::HashMap;

pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Echoes every key. The locale files already carry translated strings,
/// so this is the default for page assembly.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Table-backed translator for callers that do key-based lookup.
#[derive(Debug, Default)]
pub struct TableTranslator {
    table: HashMap<String, String>,
}

impl TableTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.table.insert(key.into(), value.into());
    }
}

impl FromIterator<(String, String)> for TableTranslator {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().collect(),
        }
    }
}

impl Translator for TableTranslator {
    fn translate(&self, key: &str) -> String {
        match self.table.get(key) {
            Some(value) => value.clone(),
            None => key.to_string(),
        }
    }
}
