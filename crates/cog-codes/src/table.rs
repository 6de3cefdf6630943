//! One-to-one code tables (regions, departements, sections).

use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::{normalize_key, overlaps};

/// A single code and its canonical name, as sourced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    pub code: String,
    pub name: String,
}

/// Bidirectional name/code index.
///
/// Entries keep file order. Forward keys keep first-insertion order so the
/// substring fallback is deterministic: the first overlapping key wins.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    by_code: HashMap<String, usize>,
    /// Forward keys in first-insertion order, each pointing into `entries`.
    keys: Vec<(String, usize)>,
    /// Key -> position in `keys`.
    slots: HashMap<String, usize>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Returns `false` when the code was already present.
    ///
    /// A repeated code replaces the previous name. A repeated key keeps its
    /// position in the scan order but points to the newer entry.
    pub fn insert(&mut self, code: String, name: String) -> bool {
        let key = normalize_key(&name);
        let (index, is_new) = match self.by_code.get(&code) {
            Some(&index) => {
                self.entries[index].name = name;
                (index, false)
            }
            None => {
                let index = self.entries.len();
                self.by_code.insert(code.clone(), index);
                self.entries.push(CodeEntry { code, name });
                (index, true)
            }
        };
        match self.slots.get(&key) {
            Some(&slot) => self.keys[slot].1 = index,
            None => {
                self.slots.insert(key.clone(), self.keys.len());
                self.keys.push((key, index));
            }
        }
        is_new
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Exact reverse lookup. The caller normalizes the code.
    pub fn get(&self, code: &str) -> Option<&CodeEntry> {
        self.by_code.get(code).map(|&index| &self.entries[index])
    }

    /// Forward lookup: exact key first, then the first overlapping key.
    ///
    /// Blank input never matches.
    pub fn find(&self, input: &str) -> Option<&CodeEntry> {
        let key = normalize_key(input);
        if key.is_empty() {
            return None;
        }
        if let Some(&slot) = self.slots.get(&key) {
            return Some(&self.entries[self.keys[slot].1]);
        }
        let (matched, index) = self
            .keys
            .iter()
            .find(|(candidate, _)| overlaps(&key, candidate))?;
        tracing::debug!(input = %key, matched = %matched, "substring fallback match");
        Some(&self.entries[*index])
    }
}
