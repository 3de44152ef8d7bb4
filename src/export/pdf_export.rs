// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, records_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{RecordExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Export the full record table as a landscape PDF.
pub(crate) fn export_pdf(records: &[RecordExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let rows = records_to_table(records);

    let mut pdf = PdfManager::landscape();
    pdf.write_table(title, None, &headers, &rows);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
