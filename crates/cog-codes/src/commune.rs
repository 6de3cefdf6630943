//! Commune table: one name may map to several communes across departements.

use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::{normalize_key, overlaps};

/// A commune and its owning departement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commune {
    /// 5-character COG code (e.g. "38185", "2A004").
    pub code: String,
    /// Enriched name as sourced.
    pub name: String,
    /// Owning departement code.
    pub departement: String,
}

/// Outcome of resolving a commune name to a single commune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommuneMatch<'a> {
    Found(&'a Commune),
    NotFound,
    /// Several communes match and no departement narrowed them down.
    Ambiguous(Vec<&'a Commune>),
}

impl<'a> CommuneMatch<'a> {
    pub fn found(&self) -> Option<&'a Commune> {
        match self {
            Self::Found(commune) => Some(*commune),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&'a str> {
        self.found().map(|commune| commune.code.as_str())
    }
}

/// Arena of communes with name, code and departement indices.
#[derive(Debug, Clone, Default)]
pub struct CommuneTable {
    communes: Vec<Commune>,
    by_code: HashMap<String, usize>,
    /// Name keys in first-insertion order with their arena indices.
    names: Vec<(String, Vec<usize>)>,
    /// Key -> position in `names`.
    slots: HashMap<String, usize>,
    by_departement: HashMap<String, Vec<usize>>,
}

impl CommuneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commune. Returns `false` when the code was already present.
    ///
    /// Both rows stay in the arena; reverse lookup resolves to the newer one.
    pub fn insert(&mut self, commune: Commune) -> bool {
        let index = self.communes.len();
        let key = normalize_key(&commune.name);
        let is_new = self.by_code.insert(commune.code.clone(), index).is_none();
        self.by_departement
            .entry(commune.departement.clone())
            .or_default()
            .push(index);
        match self.slots.get(&key) {
            Some(&slot) => self.names[slot].1.push(index),
            None => {
                self.slots.insert(key.clone(), self.names.len());
                self.names.push((key, vec![index]));
            }
        }
        self.communes.push(commune);
        is_new
    }

    pub fn len(&self) -> usize {
        self.communes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communes.is_empty()
    }

    /// All communes in file order.
    pub fn communes(&self) -> &[Commune] {
        &self.communes
    }

    /// Exact reverse lookup. The caller trims the code.
    pub fn get(&self, code: &str) -> Option<&Commune> {
        self.by_code.get(code).map(|&index| self.at(index))
    }

    /// Communes sharing a name with `input`.
    ///
    /// Exact key first; otherwise every commune under every key that
    /// overlaps the input, in index order.
    pub fn candidates(&self, input: &str) -> Vec<&Commune> {
        let key = normalize_key(input);
        if key.is_empty() {
            return Vec::new();
        }
        if let Some(&slot) = self.slots.get(&key) {
            return self.collect(&self.names[slot].1);
        }
        let candidates: Vec<&Commune> = self
            .names
            .iter()
            .filter(|(candidate, _)| overlaps(&key, candidate))
            .flat_map(|(_, indices)| indices.iter().map(|&index| self.at(index)))
            .collect();
        if !candidates.is_empty() {
            tracing::debug!(
                input = %key,
                candidates = candidates.len(),
                "commune substring fallback"
            );
        }
        candidates
    }

    /// Resolve a name to one commune, optionally restricted to a departement code.
    ///
    /// Without a departement, several candidates are reported as ambiguous
    /// rather than picking one.
    pub fn resolve(&self, input: &str, departement: Option<&str>) -> CommuneMatch<'_> {
        Self::select(self.candidates(input), departement)
    }

    /// Pick one commune out of [`Self::candidates`].
    ///
    /// With a departement, the first candidate in it wins.
    pub fn select<'a>(
        candidates: Vec<&'a Commune>,
        departement: Option<&str>,
    ) -> CommuneMatch<'a> {
        match departement {
            Some(departement) => candidates
                .into_iter()
                .find(|commune| commune.departement == departement)
                .map_or(CommuneMatch::NotFound, CommuneMatch::Found),
            None => match candidates.len() {
                0 => CommuneMatch::NotFound,
                1 => CommuneMatch::Found(candidates[0]),
                _ => CommuneMatch::Ambiguous(candidates),
            },
        }
    }

    /// Every commune whose name contains `pattern`, optionally in one departement.
    pub fn search(&self, pattern: &str, departement: Option<&str>) -> Vec<&Commune> {
        let pattern = normalize_key(pattern);
        self.names
            .iter()
            .filter(|(name, _)| name.contains(&pattern))
            .flat_map(|(_, indices)| indices.iter().map(|&index| self.at(index)))
            .filter(|commune| departement.is_none_or(|code| commune.departement == code))
            .collect()
    }

    /// Communes of one departement, in file order.
    pub fn in_departement(&self, departement: &str) -> Vec<&Commune> {
        self.by_departement
            .get(departement)
            .map(|indices| self.collect(indices))
            .unwrap_or_default()
    }

    fn at(&self, index: usize) -> &Commune {
        &self.communes[index]
    }

    fn collect(&self, indices: &[usize]) -> Vec<&Commune> {
        indices.iter().map(|&index| self.at(index)).collect()
    }
}
