//! INSEE COG and NAF code resolution.
//!
//! This crate maps French administrative and activity names to their
//! official codes, and back:
//!
//! - **Regions**: 2-digit codes (`"84"` Auvergne-Rhône-Alpes)
//! - **Departements**: 2 or 3 character codes, including `"2A"`/`"2B"`
//! - **Communes**: 5 character codes, disambiguated by departement
//! - **NAF sections**: single letters `A`..`U`
//!
//! Names match case-insensitively: exact match first, then the first name
//! that contains (or is contained in) the input. Commune lookups collect
//! every overlapping name and report ambiguity instead of guessing.
//!
//! # Reference Data Directory
//!
//! ```text
//! data/
//! ├── v_region_2025.csv        # REG, NCCENR
//! ├── v_departement_2025.csv   # DEP, NCCENR
//! ├── v_commune_2025.csv       # TYPECOM, COM, DEP, NCCENR
//! └── naf_niveau_1.csv         # Code, Libellé
//! ```
//!
//! The directory is taken from `INSEE_COG_DIR`, falling back to `data/` at
//! the workspace root.
//!
//! # Example
//!
//! ```rust,ignore
//! use cog_codes::CommuneMatch;
//!
//! let cog = cog_codes::global();
//! assert_eq!(cog.region_code("Auvergne-Rhône-Alpes")?, Some("84"));
//!
//! if let CommuneMatch::Found(commune) = cog.commune_code("Grenoble", Some("Isère"))? {
//!     println!("{} -> {}", commune.name, commune.code);
//! }
//! ```

#![deny(unsafe_code)]

pub mod commune;
pub mod config;
pub mod context;
pub mod dataset;
pub mod doctor;
pub mod error;
pub mod filters;
pub mod hash;
pub mod loader;
pub mod normalize;
pub mod table;

pub use commune::{Commune, CommuneMatch, CommuneTable};
pub use config::{CogConfig, DATA_DIR_ENV_VAR, default_data_dir};
pub use context::{CogContext, global};
pub use dataset::Dataset;
pub use doctor::{DatasetStatus, DoctorReport};
pub use error::{CogError, DatasetError, Result};
pub use filters::{
    Candidate, FilterError, FilterField, ResolvedFilters, SearchFilters, UnresolvedFilter,
    UnresolvedReason, resolve_filters, section_filter_code,
};
pub use table::{CodeEntry, CodeTable};
