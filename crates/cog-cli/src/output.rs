//! Table and JSON rendering for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use cog_codes::{CodeEntry, Commune, DoctorReport, ResolvedFilters};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code).add_attribute(Attribute::Bold)
}

/// Code/name listing of a simple table, in file order.
pub fn entries_table(entries: &[CodeEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Name")]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![code_cell(&entry.code), Cell::new(&entry.name)]);
    }
    table
}

/// Communes with their departement.
pub fn communes_table(communes: &[&Commune]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Departement"),
    ]);
    apply_table_style(&mut table);
    for commune in communes {
        table.add_row(vec![
            code_cell(&commune.code),
            Cell::new(&commune.name),
            Cell::new(&commune.departement).set_alignment(CellAlignment::Center),
        ]);
    }
    table
}

/// Filter name to translated code.
pub fn filters_table(resolved: &ResolvedFilters) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Code")]);
    apply_table_style(&mut table);
    let rows = [
        ("region", &resolved.region),
        ("departement", &resolved.departement),
        ("commune", &resolved.commune),
        ("section", &resolved.section),
    ];
    for (filter, code) in rows {
        if let Some(code) = code {
            table.add_row(vec![Cell::new(filter), code_cell(code)]);
        }
    }
    table
}

pub fn doctor_table(report: &DoctorReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Path"),
        header_cell("Entries"),
        header_cell("SHA-256"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for status in &report.datasets {
        let entries = status
            .entries
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        let digest = status
            .sha256
            .as_deref()
            .map(|hex| hex.chars().take(12).collect::<String>())
            .unwrap_or_else(|| "-".to_string());
        let state = match &status.error {
            None => Cell::new("ok").fg(Color::Green),
            Some(error) => Cell::new(error).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(status.dataset.as_str()),
            Cell::new(status.path.display().to_string()),
            Cell::new(entries).set_alignment(CellAlignment::Right),
            Cell::new(digest),
            state,
        ]);
    }
    table
}

/// JSON shape of a commune resolution.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommuneOutput<'a> {
    Found { commune: &'a Commune },
    NotFound { name: &'a str },
    Ambiguous { name: &'a str, candidates: Vec<&'a Commune> },
}

/// Pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
