//! Reference file parsing.
//!
//! Each loader reads one CSV file with a header row into an immutable table.
//! Any I/O error, CSV syntax error, missing column or blank required field
//! fails the whole load: a partially built table is never returned.

use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::commune::{Commune, CommuneTable};
use crate::dataset::{COMMUNE_PARENT_COLUMN, COMMUNE_ROW_TYPE, COMMUNE_TYPE_COLUMN, Dataset};
use crate::error::DatasetError;
use crate::table::CodeTable;

/// Load a region, departement or section file.
pub fn load_code_table(dataset: Dataset, path: &Path) -> Result<CodeTable, DatasetError> {
    let started = Instant::now();
    let bytes = std::fs::read(path).map_err(|e| DatasetError::io(path, e))?;
    let table = parse_code_table(dataset, &bytes, path)?;
    tracing::info!(
        dataset = %dataset,
        path = %path.display(),
        entries = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded reference table"
    );
    Ok(table)
}

/// Parse region, departement or section CSV content.
///
/// `path` is only used in error messages.
pub fn parse_code_table(
    dataset: Dataset,
    bytes: &[u8],
    path: &Path,
) -> Result<CodeTable, DatasetError> {
    let mut reader = csv_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    let code_column = dataset.code_column();
    let name_column = dataset.name_column();
    let code_idx = column_index(&headers, code_column, path)?;
    let name_idx = column_index(&headers, name_column, path)?;

    let mut table = CodeTable::new();
    let mut duplicate_count = 0u32;
    for record in reader.records() {
        let record = record.map_err(|e| DatasetError::csv(path, e))?;
        let code = required_field(&record, code_idx, code_column, path)?;
        let name = required_field(&record, name_idx, name_column, path)?;

        // Section codes are canonically uppercase
        let code = match dataset {
            Dataset::Sections => code.to_uppercase(),
            _ => code.to_string(),
        };
        if !table.insert(code, name.to_string()) {
            duplicate_count += 1;
        }
    }

    if duplicate_count > 0 {
        tracing::warn!(
            dataset = %dataset,
            path = %path.display(),
            duplicate_count,
            "reference file repeats codes; later rows win"
        );
    }
    Ok(table)
}

/// Load the commune file, keeping only `TYPECOM = COM` rows.
pub fn load_commune_table(path: &Path) -> Result<CommuneTable, DatasetError> {
    let started = Instant::now();
    let bytes = std::fs::read(path).map_err(|e| DatasetError::io(path, e))?;
    let table = parse_commune_table(&bytes, path)?;
    tracing::info!(
        dataset = %Dataset::Communes,
        path = %path.display(),
        entries = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded reference table"
    );
    Ok(table)
}

/// Parse commune CSV content.
///
/// Arrondissements (`ARM`), associated (`COMA`) and delegated (`COMD`)
/// communes are skipped.
pub fn parse_commune_table(bytes: &[u8], path: &Path) -> Result<CommuneTable, DatasetError> {
    let mut reader = csv_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    let code_column = Dataset::Communes.code_column();
    let name_column = Dataset::Communes.name_column();
    let type_idx = column_index(&headers, COMMUNE_TYPE_COLUMN, path)?;
    let code_idx = column_index(&headers, code_column, path)?;
    let name_idx = column_index(&headers, name_column, path)?;
    let parent_idx = column_index(&headers, COMMUNE_PARENT_COLUMN, path)?;

    let mut table = CommuneTable::new();
    let mut skipped_count = 0u32;
    let mut duplicate_count = 0u32;
    for record in reader.records() {
        let record = record.map_err(|e| DatasetError::csv(path, e))?;
        if record.get(type_idx) != Some(COMMUNE_ROW_TYPE) {
            skipped_count += 1;
            continue;
        }

        let commune = Commune {
            code: required_field(&record, code_idx, code_column, path)?.to_string(),
            name: required_field(&record, name_idx, name_column, path)?.to_string(),
            departement: required_field(&record, parent_idx, COMMUNE_PARENT_COLUMN, path)?
                .to_string(),
        };
        if !table.insert(commune) {
            duplicate_count += 1;
        }
    }

    if skipped_count > 0 {
        tracing::debug!(
            path = %path.display(),
            skipped_count,
            "skipped non-commune rows (arrondissements, associated and delegated communes)"
        );
    }
    if duplicate_count > 0 {
        tracing::warn!(
            path = %path.display(),
            duplicate_count,
            "commune file repeats codes; later rows win for reverse lookup"
        );
    }
    Ok(table)
}

fn csv_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(bytes)
}

/// Position of a header, ignoring a leading BOM and surrounding whitespace.
fn column_index(
    headers: &StringRecord,
    column: &'static str,
    path: &Path,
) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|header| header.trim_matches('\u{feff}').trim() == column)
        .ok_or_else(|| DatasetError::MissingColumn {
            column,
            path: path.to_path_buf(),
        })
}

fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
    path: &Path,
) -> Result<&'r str, DatasetError> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DatasetError::EmptyField {
            column,
            line: record.position().map_or(0, csv::Position::line),
            path: path.to_path_buf(),
        })
}
