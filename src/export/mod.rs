// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;
mod pdf;
mod pdf_export;
pub mod range;
pub mod report;
pub mod snapshot;
mod xlsx;

pub use logic::ExportLogic;
pub use model::{ExportFilter, RecordExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export writer.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

pub(crate) use fs_utils::ensure_writable;
