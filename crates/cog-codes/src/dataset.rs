//! Reference dataset identities and their CSV column contracts.

use serde::Serialize;

/// One of the four reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Regions (2-digit codes).
    Regions,
    /// Departements (2 or 3 character codes, including `2A`/`2B`).
    Departements,
    /// Communes (5 character codes), keyed by owning departement.
    Communes,
    /// NAF rev. 2 sections (single letters `A`..`U`).
    Sections,
}

impl Dataset {
    /// Get all datasets in loading order.
    pub const fn all() -> &'static [Dataset] {
        &[
            Self::Regions,
            Self::Departements,
            Self::Communes,
            Self::Sections,
        ]
    }

    /// Stable lowercase identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Departements => "departements",
            Self::Communes => "communes",
            Self::Sections => "sections",
        }
    }

    /// File name shipped for the current COG / NAF vintage.
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Regions => "v_region_2025.csv",
            Self::Departements => "v_departement_2025.csv",
            Self::Communes => "v_commune_2025.csv",
            Self::Sections => "naf_niveau_1.csv",
        }
    }

    /// Column holding the official code.
    pub const fn code_column(&self) -> &'static str {
        match self {
            Self::Regions => "REG",
            Self::Departements => "DEP",
            Self::Communes => "COM",
            Self::Sections => "Code",
        }
    }

    /// Column holding the display name (`NCCENR` is the enriched name, with accents).
    pub const fn name_column(&self) -> &'static str {
        match self {
            Self::Regions | Self::Departements | Self::Communes => "NCCENR",
            Self::Sections => "Libellé",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commune file: row type discriminant.
pub const COMMUNE_TYPE_COLUMN: &str = "TYPECOM";

/// Commune file: owning departement.
pub const COMMUNE_PARENT_COLUMN: &str = "DEP";

/// `TYPECOM` value of an actual commune (as opposed to `ARM`, `COMA`, `COMD`).
pub const COMMUNE_ROW_TYPE: &str = "COM";
