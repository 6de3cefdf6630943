//! Translation of free-text search filters into registry codes.
//!
//! Enterprise search accepts region, departement, commune and NAF section
//! filters as codes. Users type names. [`resolve_filters`] turns one into the
//! other and, when a value cannot be turned into exactly one code, returns a
//! [`FilterError`] that lists what the user could have meant.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commune::{Commune, CommuneMatch};
use crate::context::CogContext;
use crate::error::CogError;
use crate::normalize::{as_departement_code, as_section_code};
use crate::table::CodeEntry;

/// Maximum number of candidates rendered in an error message.
pub const MAX_RENDERED_CANDIDATES: usize = 20;

/// Raw filter values as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub region: Option<String>,
    pub departement: Option<String>,
    pub commune: Option<String>,
    pub section: Option<String>,
}

/// Filter values translated to codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedFilters {
    pub region: Option<String>,
    pub departement: Option<String>,
    pub commune: Option<String>,
    pub section: Option<String>,
}

/// Which filter failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Region,
    Departement,
    Commune,
    Section,
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Region => "region",
            Self::Departement => "departement",
            Self::Commune => "commune",
            Self::Section => "section",
        })
    }
}

/// Why a filter value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    NotFound,
    Ambiguous,
}

/// A code the user may have meant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departement: Option<String>,
}

impl From<&CodeEntry> for Candidate {
    fn from(entry: &CodeEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            departement: None,
        }
    }
}

impl From<&Commune> for Candidate {
    fn from(commune: &Commune) -> Self {
        Self {
            code: commune.code.clone(),
            name: commune.name.clone(),
            departement: Some(commune.departement.clone()),
        }
    }
}

/// A filter value that did not translate to exactly one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedFilter {
    pub field: FilterField,
    pub value: String,
    pub reason: UnresolvedReason,
    pub candidates: Vec<Candidate>,
}

impl fmt::Display for UnresolvedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UnresolvedReason::NotFound => {
                write!(f, "{} '{}' not found", self.field, self.value)?;
            }
            UnresolvedReason::Ambiguous => write!(
                f,
                "{} '{}' is ambiguous ({} matches); add a departement to narrow it down",
                self.field,
                self.value,
                self.candidates.len()
            )?,
        }
        if self.candidates.is_empty() {
            return Ok(());
        }
        write!(f, "\nAvailable:")?;
        for candidate in self.candidates.iter().take(MAX_RENDERED_CANDIDATES) {
            match &candidate.departement {
                Some(departement) => write!(
                    f,
                    "\n  {} - {} ({})",
                    candidate.code, candidate.name, departement
                )?,
                None => write!(f, "\n  {} - {}", candidate.code, candidate.name)?,
            }
        }
        if self.candidates.len() > MAX_RENDERED_CANDIDATES {
            write!(
                f,
                "\n  ... and {} more",
                self.candidates.len() - MAX_RENDERED_CANDIDATES
            )?;
        }
        Ok(())
    }
}

/// Errors from [`resolve_filters`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Dataset(#[from] CogError),

    #[error("{0}")]
    Unresolved(UnresolvedFilter),
}

impl FilterError {
    /// The rejected filter, if the failure was a resolution failure.
    pub fn unresolved(&self) -> Option<&UnresolvedFilter> {
        match self {
            Self::Unresolved(unresolved) => Some(unresolved),
            Self::Dataset(_) => None,
        }
    }
}

/// Resolve a section filter: a letter `A`..`U` is taken as a code as-is,
/// anything else is looked up as a label.
pub fn section_filter_code(cog: &CogContext, value: &str) -> Result<Option<String>, CogError> {
    if let Some(code) = as_section_code(value) {
        return Ok(Some(code.to_string()));
    }
    Ok(cog.section_code(value)?.map(str::to_string))
}

/// Translate every present filter into a code.
///
/// Blank values are treated as absent. Region and departement filters accept
/// a known code as well as a name. The departement filter, when given,
/// also narrows the commune filter; a departement that does not resolve is
/// reported against the departement filter.
pub fn resolve_filters(
    cog: &CogContext,
    filters: &SearchFilters,
) -> Result<ResolvedFilters, FilterError> {
    let mut resolved = ResolvedFilters::default();

    if let Some(value) = present(&filters.region) {
        let code = match cog.region_name(value)? {
            Some(_) => Some(value.to_string()),
            None => cog.region_code(value)?.map(str::to_string),
        };
        let code =
            code.ok_or_else(|| not_found(FilterField::Region, value, cog.list_regions()))?;
        resolved.region = Some(code);
    }

    if let Some(value) = present(&filters.departement) {
        let code = match as_departement_code(value) {
            Some(code) if cog.departement_name(&code)?.is_some() => Some(code),
            _ => cog.departement_code(value)?.map(str::to_string),
        };
        let code = code.ok_or_else(|| {
            not_found(FilterField::Departement, value, cog.list_departements())
        })?;
        resolved.departement = Some(code);
    }

    if let Some(value) = present(&filters.commune) {
        resolved.commune = Some(resolve_commune(cog, value, resolved.departement.as_deref())?);
    }

    if let Some(value) = present(&filters.section) {
        let code = section_filter_code(cog, value)?
            .ok_or_else(|| not_found(FilterField::Section, value, cog.list_sections()))?;
        resolved.section = Some(code);
    }

    Ok(resolved)
}

fn resolve_commune(
    cog: &CogContext,
    value: &str,
    departement: Option<&str>,
) -> Result<String, FilterError> {
    match cog.commune_code(value, departement)? {
        CommuneMatch::Found(commune) => Ok(commune.code.clone()),
        CommuneMatch::Ambiguous(matches) => Err(FilterError::Unresolved(UnresolvedFilter {
            field: FilterField::Commune,
            value: value.to_string(),
            reason: UnresolvedReason::Ambiguous,
            candidates: matches.into_iter().map(Candidate::from).collect(),
        })),
        CommuneMatch::NotFound => {
            let similar = cog.search_communes(value, None)?;
            Err(FilterError::Unresolved(UnresolvedFilter {
                field: FilterField::Commune,
                value: value.to_string(),
                reason: UnresolvedReason::NotFound,
                candidates: similar.into_iter().map(Candidate::from).collect(),
            }))
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn candidates(entries: &[CodeEntry]) -> Vec<Candidate> {
    entries.iter().map(Candidate::from).collect()
}

/// Build a not-found error listing the whole table.
fn not_found(
    field: FilterField,
    value: &str,
    listing: Result<&[CodeEntry], CogError>,
) -> FilterError {
    match listing {
        Ok(entries) => FilterError::Unresolved(UnresolvedFilter {
            field,
            value: value.to_string(),
            reason: UnresolvedReason::NotFound,
            candidates: candidates(entries),
        }),
        Err(error) => FilterError::Dataset(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unresolved(field: FilterField, reason: UnresolvedReason, count: usize) -> UnresolvedFilter {
        UnresolvedFilter {
            field,
            value: "x".to_string(),
            reason,
            candidates: (0..count)
                .map(|i| Candidate {
                    code: format!("{i:02}"),
                    name: format!("Name {i}"),
                    departement: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_not_found_lists_candidates() {
        let message = unresolved(FilterField::Region, UnresolvedReason::NotFound, 2).to_string();
        assert_eq!(
            message,
            "region 'x' not found\nAvailable:\n  00 - Name 0\n  01 - Name 1"
        );
    }

    #[test]
    fn test_render_caps_candidate_list() {
        let message = unresolved(FilterField::Commune, UnresolvedReason::Ambiguous, 25).to_string();
        assert!(message.starts_with("commune 'x' is ambiguous (25 matches)"));
        assert!(message.contains("  19 - Name 19"));
        assert!(!message.contains("  20 - Name 20"));
        assert!(message.ends_with("... and 5 more"));
    }

    #[test]
    fn test_render_without_candidates() {
        let message = unresolved(FilterField::Commune, UnresolvedReason::NotFound, 0).to_string();
        assert_eq!(message, "commune 'x' not found");
    }

    #[test]
    fn test_present_treats_blank_as_absent() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("  ".to_string())), None);
        assert_eq!(present(&Some(" Isère ".to_string())), Some("Isère"));
    }
}
