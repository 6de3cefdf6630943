//! Lazily loaded resolution context.
//!
//! A [`CogContext`] owns the four reference tables. Each table is loaded on
//! first use, at most once, behind a [`OnceLock`]: callers racing on first
//! use block until the single build completes and all observe the same
//! table. Load failures are cached as well, so a broken file is reported on
//! every call without being read again.

use std::sync::OnceLock;

use crate::commune::{Commune, CommuneMatch, CommuneTable};
use crate::config::CogConfig;
use crate::dataset::Dataset;
use crate::error::{CogError, Result};
use crate::loader::{load_code_table, load_commune_table};
use crate::normalize::as_departement_code;
use crate::table::{CodeEntry, CodeTable};

/// Process-wide context built from [`CogConfig::from_env`].
static GLOBAL_CONTEXT: OnceLock<CogContext> = OnceLock::new();

/// Returns the process-wide context.
///
/// The context is created on first access; its tables load on first use.
pub fn global() -> &'static CogContext {
    GLOBAL_CONTEXT.get_or_init(|| CogContext::new(CogConfig::from_env()))
}

/// Name/code resolution over regions, departements, communes and NAF sections.
///
/// # Example
///
/// ```rust,ignore
/// use cog_codes::{CogConfig, CogContext, CommuneMatch};
///
/// let cog = CogContext::new(CogConfig::from_env());
/// assert_eq!(cog.region_code("Auvergne-Rhône-Alpes")?, Some("84"));
/// assert_eq!(cog.departement_code("rhône")?, Some("69"));
///
/// match cog.commune_code("Saint-Martin", None)? {
///     CommuneMatch::Ambiguous(candidates) => println!("{} candidates", candidates.len()),
///     CommuneMatch::Found(commune) => println!("{}", commune.code),
///     CommuneMatch::NotFound => println!("no such commune"),
/// }
/// ```
#[derive(Debug)]
pub struct CogContext {
    config: CogConfig,
    regions: OnceLock<Result<CodeTable>>,
    departements: OnceLock<Result<CodeTable>>,
    communes: OnceLock<Result<CommuneTable>>,
    sections: OnceLock<Result<CodeTable>>,
}

impl CogContext {
    /// Create a context. Nothing is read until a table is first used.
    pub fn new(config: CogConfig) -> Self {
        Self {
            config,
            regions: OnceLock::new(),
            departements: OnceLock::new(),
            communes: OnceLock::new(),
            sections: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &CogConfig {
        &self.config
    }

    /// Load every table now instead of on first use.
    ///
    /// Returns the first load failure.
    pub fn preload(&self) -> Result<()> {
        self.region_table()?;
        self.departement_table()?;
        self.commune_table()?;
        self.section_table()?;
        Ok(())
    }

    // =========================================================================
    // Regions
    // =========================================================================

    /// Region code for a name (e.g. "Auvergne-Rhône-Alpes" -> "84").
    pub fn region_code(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.region_table()?.find(name).map(|e| e.code.as_str()))
    }

    /// Region name for a code.
    pub fn region_name(&self, code: &str) -> Result<Option<&str>> {
        Ok(self.region_table()?.get(code.trim()).map(|e| e.name.as_str()))
    }

    /// All regions in file order.
    pub fn list_regions(&self) -> Result<&[CodeEntry]> {
        Ok(self.region_table()?.entries())
    }

    // =========================================================================
    // Departements
    // =========================================================================

    /// Departement code for a name (e.g. "Isère" -> "38").
    pub fn departement_code(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.departement_table()?.find(name).map(|e| e.code.as_str()))
    }

    /// Departement name for a code (e.g. "2A" -> "Corse-du-Sud").
    pub fn departement_name(&self, code: &str) -> Result<Option<&str>> {
        Ok(self
            .departement_table()?
            .get(code.trim())
            .map(|e| e.name.as_str()))
    }

    /// All departements in file order.
    pub fn list_departements(&self) -> Result<&[CodeEntry]> {
        Ok(self.departement_table()?.entries())
    }

    /// Turn a departement hint (code or name) into a code.
    ///
    /// Blank hints mean "no hint" and yield `None`. Bare codes are taken
    /// as-is; names go through [`Self::departement_code`] and fail with
    /// [`CogError::InvalidHint`] when they do not resolve.
    pub fn resolve_departement_hint(&self, hint: Option<&str>) -> Result<Option<String>> {
        let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(None);
        };
        if let Some(code) = as_departement_code(hint) {
            return Ok(Some(code));
        }
        match self.departement_code(hint)? {
            Some(code) => Ok(Some(code.to_string())),
            None => Err(CogError::InvalidHint {
                hint: hint.to_string(),
            }),
        }
    }

    // =========================================================================
    // Communes
    // =========================================================================

    /// Resolve a commune name, optionally disambiguated by a departement
    /// code or name.
    ///
    /// Without a departement, a name shared by several communes is reported
    /// as [`CommuneMatch::Ambiguous`]. A name with no candidate is NotFound
    /// whatever the hint; otherwise a departement hint that does not resolve
    /// fails the lookup with [`CogError::InvalidHint`].
    pub fn commune_code(&self, name: &str, departement: Option<&str>) -> Result<CommuneMatch<'_>> {
        let candidates = self.commune_table()?.candidates(name);
        if candidates.is_empty() {
            return Ok(CommuneMatch::NotFound);
        }
        let departement = self.resolve_departement_hint(departement)?;
        Ok(CommuneTable::select(candidates, departement.as_deref()))
    }

    /// Commune name for a code.
    pub fn commune_name(&self, code: &str) -> Result<Option<&str>> {
        Ok(self.commune(code)?.map(|c| c.name.as_str()))
    }

    /// Full commune record for a code.
    pub fn commune(&self, code: &str) -> Result<Option<&Commune>> {
        Ok(self.commune_table()?.get(code.trim()))
    }

    /// Every commune whose name contains `pattern`, optionally restricted to
    /// one departement (code or name).
    pub fn search_communes(
        &self,
        pattern: &str,
        departement: Option<&str>,
    ) -> Result<Vec<&Commune>> {
        let communes = self.commune_table()?;
        let departement = self.resolve_departement_hint(departement)?;
        Ok(communes.search(pattern, departement.as_deref()))
    }

    /// All communes of a departement (code or name), in file order.
    pub fn communes_in_departement(&self, departement: &str) -> Result<Vec<&Commune>> {
        let communes = self.commune_table()?;
        match self.resolve_departement_hint(Some(departement))? {
            Some(code) => Ok(communes.in_departement(&code)),
            None => Err(CogError::InvalidHint {
                hint: departement.to_string(),
            }),
        }
    }

    // =========================================================================
    // NAF sections
    // =========================================================================

    /// Section code for a label (e.g. "Construction" -> "F").
    pub fn section_code(&self, label: &str) -> Result<Option<&str>> {
        Ok(self.section_table()?.find(label).map(|e| e.code.as_str()))
    }

    /// Section label for a code, case-insensitive.
    pub fn section_label(&self, code: &str) -> Result<Option<&str>> {
        Ok(self
            .section_table()?
            .get(&code.trim().to_uppercase())
            .map(|e| e.name.as_str()))
    }

    /// All sections in file order.
    pub fn list_sections(&self) -> Result<&[CodeEntry]> {
        Ok(self.section_table()?.entries())
    }

    /// Whether `code` is a section code present in the table.
    pub fn is_valid_section_code(&self, code: &str) -> Result<bool> {
        Ok(self.section_label(code)?.is_some())
    }

    // =========================================================================
    // Table access
    // =========================================================================

    fn region_table(&self) -> Result<&CodeTable> {
        self.code_table(&self.regions, Dataset::Regions)
    }

    fn departement_table(&self) -> Result<&CodeTable> {
        self.code_table(&self.departements, Dataset::Departements)
    }

    fn section_table(&self) -> Result<&CodeTable> {
        self.code_table(&self.sections, Dataset::Sections)
    }

    fn code_table<'a>(
        &self,
        cell: &'a OnceLock<Result<CodeTable>>,
        dataset: Dataset,
    ) -> Result<&'a CodeTable> {
        cell.get_or_init(|| {
            let path = self.config.path_for(dataset);
            load_code_table(dataset, &path).map_err(|e| self.unavailable(dataset, &e))
        })
        .as_ref()
        .map_err(Clone::clone)
    }

    fn commune_table(&self) -> Result<&CommuneTable> {
        self.communes
            .get_or_init(|| {
                let path = self.config.path_for(Dataset::Communes);
                load_commune_table(&path).map_err(|e| self.unavailable(Dataset::Communes, &e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn unavailable(&self, dataset: Dataset, error: &crate::error::DatasetError) -> CogError {
        let path = self.config.path_for(dataset);
        tracing::warn!(
            dataset = %dataset,
            path = %path.display(),
            error = %error,
            "reference data unavailable"
        );
        CogError::DatasetUnavailable {
            dataset,
            path,
            reason: error.to_string(),
        }
    }
}
