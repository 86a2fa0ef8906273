//! Insertion-ordered value storage
//!
//! Holds the winning value per canonical key. Output order is insertion
//! order; replacing a key moves it to the end.

use crate::config::{BaseConfig, VariableSchema};

/// A candidate value and the schema that produced it
#[derive(Debug, Clone)]
pub struct StoredValue<'a> {
    pub value: String,
    pub schema: &'a VariableSchema,
}

/// Ordered map from canonical key to its current value
#[derive(Debug, Default)]
pub struct ValueStorage<'a> {
    entries: Vec<(String, StoredValue<'a>)>,
}

impl<'a> ValueStorage<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with the base config, in table order
    pub fn seeded(base: &'a BaseConfig) -> Self {
        let entries = base
            .iter()
            .map(|entry| {
                (
                    entry.key.clone(),
                    StoredValue {
                        value: entry.value.clone(),
                        schema: &entry.schema,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&StoredValue<'a>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<StoredValue<'a>> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Insert at the end, dropping any existing entry for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: StoredValue<'a>) {
        let key = key.into();
        self.remove(&key);
        self.entries.push((key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredValue<'a>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
