// src/export/logic.rs

use crate::core::ledger::Ledger;
use crate::core::store::LedgerStore;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_writable, require_absolute};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportFilter, RecordExport};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export of ledger snapshots.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the records selected by `filter` to `file`.
    ///
    /// Returns the number of records written; 0 means nothing matched and
    /// no file was produced.
    pub fn export<S: LedgerStore>(
        ledger: &Ledger<S>,
        format: &ExportFormat,
        file: &str,
        filter: &ExportFilter,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        require_absolute(path)?;
        ensure_writable(path, force)?;

        let records = ledger.export_filtered(filter)?;

        if records.is_empty() {
            warning("No records found for the selected filter. Nothing to export.");
            return Ok(0);
        }

        export_to_format(format, &records, path, &build_title(filter))?;

        Ok(records.len())
    }
}

fn export_to_format(
    format: &ExportFormat,
    records: &[RecordExport],
    path: &Path,
    title: &str,
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(records, path),
        ExportFormat::Json => export_json(records, path),
        ExportFormat::Xlsx => export_xlsx(records, path, sheet_name(title)),
        ExportFormat::Pdf => export_pdf(records, path, title),
    }
}

fn build_title(filter: &ExportFilter) -> String {
    let mut title = match &filter.unit {
        Some(u) => format!("Fuel records - unit {u}"),
        None => "Fuel records - all units".to_string(),
    };

    if let Some((from, to)) = filter.range {
        if from == to {
            title.push_str(&format!(" ({from})"));
        } else {
            title.push_str(&format!(" ({from} to {to})"));
        }
    }

    title
}

/// Excel caps sheet names at 31 chars.
fn sheet_name(title: &str) -> &str {
    if title.contains("unit ") { "Unit records" } else { "All records" }
}
