//! Reference data location.

use std::path::PathBuf;

use crate::dataset::Dataset;

/// Environment variable for overriding the reference data directory.
pub const DATA_DIR_ENV_VAR: &str = "INSEE_COG_DIR";

/// Get the default reference data directory.
///
/// Resolution order:
/// 1. `INSEE_COG_DIR` environment variable
/// 2. `data/` directory relative to the workspace root
pub fn default_data_dir() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Where each reference file lives.
///
/// # Example
///
/// ```
/// use cog_codes::{CogConfig, Dataset};
///
/// let config = CogConfig::from_dir("/srv/cog").with_communes_file("communes.csv");
/// assert!(config.path_for(Dataset::Communes).ends_with("communes.csv"));
/// assert!(config.path_for(Dataset::Regions).ends_with("v_region_2025.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CogConfig {
    /// Directory holding the reference files.
    pub data_dir: PathBuf,
    pub regions_file: String,
    pub departements_file: String,
    pub communes_file: String,
    pub sections_file: String,
}

impl Default for CogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CogConfig {
    /// Config rooted at `INSEE_COG_DIR` (or the workspace `data/` directory).
    pub fn from_env() -> Self {
        Self::from_dir(default_data_dir())
    }

    /// Config rooted at `dir` with the default file names.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            regions_file: Dataset::Regions.default_file_name().to_string(),
            departements_file: Dataset::Departements.default_file_name().to_string(),
            communes_file: Dataset::Communes.default_file_name().to_string(),
            sections_file: Dataset::Sections.default_file_name().to_string(),
        }
    }

    #[must_use]
    pub fn with_regions_file(mut self, name: impl Into<String>) -> Self {
        self.regions_file = name.into();
        self
    }

    #[must_use]
    pub fn with_departements_file(mut self, name: impl Into<String>) -> Self {
        self.departements_file = name.into();
        self
    }

    #[must_use]
    pub fn with_communes_file(mut self, name: impl Into<String>) -> Self {
        self.communes_file = name.into();
        self
    }

    #[must_use]
    pub fn with_sections_file(mut self, name: impl Into<String>) -> Self {
        self.sections_file = name.into();
        self
    }

    /// Full path of the file backing `dataset`.
    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        let file = match dataset {
            Dataset::Regions => &self.regions_file,
            Dataset::Departements => &self.departements_file,
            Dataset::Communes => &self.communes_file,
            Dataset::Sections => &self.sections_file,
        };
        self.data_dir.join(file)
    }
}
