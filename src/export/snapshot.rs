// src/export/snapshot.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;
use std::fs;
use std::path::Path;

/// Column names of `RecordExport`, written up front so an empty log still
/// yields a readable snapshot.
const SNAPSHOT_HEADERS: [&str; 13] = [
    "id",
    "date",
    "unit",
    "shift",
    "hm_start",
    "hm_end",
    "delta",
    "ration_rate",
    "consumption",
    "tank_capacity",
    "buffer_stock",
    "is_latest",
    "recorded_by",
];

/// Write a full-log snapshot as CSV (used by reset before clearing).
pub fn write_snapshot(path: &Path, records: &[RecordExport]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::Export(format!("snapshot open error: {e}")))?;

    wtr.write_record(SNAPSHOT_HEADERS)
        .map_err(|e| AppError::Export(format!("snapshot write error: {e}")))?;

    for r in records {
        wtr.serialize(r)
            .map_err(|e| AppError::Export(format!("snapshot write error: {e}")))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read a snapshot written by `write_snapshot`.
pub fn read_snapshot(path: &Path) -> AppResult<Vec<RecordExport>> {
    let mut rdr = csv::Reader::from_path(path)
        .map_err(|e| AppError::Export(format!("snapshot open error: {e}")))?;

    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row.map_err(|e| AppError::Export(format!("snapshot read error: {e}")))?);
    }
    Ok(out)
}
