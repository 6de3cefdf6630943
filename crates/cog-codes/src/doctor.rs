//! Reference data health report.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::CogConfig;
use crate::dataset::Dataset;
use crate::hash::sha256_hex;
use crate::loader::{parse_code_table, parse_commune_table};

/// State of one reference file.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatus {
    pub dataset: Dataset,
    pub path: PathBuf,
    pub exists: bool,
    pub sha256: Option<String>,
    /// Indexed entries (communes only count `TYPECOM = COM` rows).
    pub entries: Option<usize>,
    pub error: Option<String>,
}

impl DatasetStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub data_dir: PathBuf,
    pub datasets: Vec<DatasetStatus>,
}

impl DoctorReport {
    /// Read and parse every reference file named by `config`.
    ///
    /// Unlike [`crate::CogContext`], nothing is cached: each call reads the
    /// files again.
    pub fn collect(config: &CogConfig) -> Self {
        let datasets = Dataset::all()
            .iter()
            .map(|&dataset| inspect(dataset, config.path_for(dataset)))
            .collect();
        Self {
            schema: "cog-codes.data-doctor".to_string(),
            schema_version: 1,
            data_dir: config.data_dir.clone(),
            datasets,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.datasets.iter().all(DatasetStatus::is_ok)
    }
}

fn inspect(dataset: Dataset, path: PathBuf) -> DatasetStatus {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) => {
            return DatasetStatus {
                dataset,
                exists: path.exists(),
                path,
                sha256: None,
                entries: None,
                error: Some(error.to_string()),
            };
        }
    };

    let parsed = match dataset {
        Dataset::Communes => parse_commune_table(&bytes, &path).map(|t| t.len()),
        _ => parse_code_table(dataset, &bytes, &path).map(|t| t.len()),
    };
    let (entries, error) = match parsed {
        Ok(count) => (Some(count), None),
        Err(error) => (None, Some(error.to_string())),
    };
    DatasetStatus {
        dataset,
        path,
        exists: true,
        sha256: Some(sha256_hex(&bytes)),
        entries,
        error,
    }
}
