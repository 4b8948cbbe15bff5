//! Translation Tables
//!
//! A tree keyed by dot-separated path segments. Leaves are strings, or
//! ordered string lists for rotating placeholder sets.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::I18nError;

/// A value in the tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    List(Vec<String>),
    Tree(HashMap<String, TranslationValue>),
}

/// One locale's translation table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    entries: HashMap<String, TranslationValue>,
}

impl TranslationTable {
    /// Parse a table from its JSON source
    pub fn from_json(src: &str) -> Result<Self, I18nError> {
        let entries: HashMap<String, TranslationValue> = serde_json::from_str(src)?;
        Ok(Self { entries })
    }

    /// Resolve a dot-separated key path to its value
    pub fn lookup(&self, key: &str) -> Option<&TranslationValue> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut value = self.entries.get(first)?;
        for segment in segments {
            match value {
                TranslationValue::Tree(map) => value = map.get(segment)?,
                _ => return None,
            }
        }
        Some(value)
    }

    /// Resolve a key to a string leaf
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.lookup(key)? {
            TranslationValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Resolve a key to a list leaf
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.lookup(key)? {
            TranslationValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Every leaf key path, in sorted order
    pub fn key_set(&self) -> BTreeSet<String> {
        fn walk(prefix: &str, value: &TranslationValue, out: &mut BTreeSet<String>) {
            match value {
                TranslationValue::Tree(map) => {
                    for (k, v) in map {
                        let path = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&path, v, out);
                    }
                }
                _ => {
                    out.insert(prefix.to_string());
                }
            }
        }
        let mut out = BTreeSet::new();
        for (k, v) in &self.entries {
            walk(k, v, &mut out);
        }
        out
    }

    /// Leaf keys present in a reference table but absent here. After
    /// synchronization every locale must report an empty list against the
    /// source language (empty strings are permitted, missing keys are not).
    pub fn missing_keys(&self, reference: &TranslationTable) -> Vec<String> {
        let mine = self.key_set();
        reference
            .key_set()
            .into_iter()
            .filter(|k| !mine.contains(k))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
