//! Daily refueling plan: one PDF per date and shift selection.

use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::shift::{Shift, ShiftSelector};
use crate::ui::messages::info;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const REPORT_HEADERS: [&str; 7] = [
    "Date",
    "Unit",
    "Shift",
    "HM Start",
    "HM Delta",
    "Qty Plan Refueling",
    "Note",
];

/// Records of `date` matching the shift selection, in log order.
pub fn select_for_report(
    records: &[RecordExport],
    date: NaiveDate,
    shift: ShiftSelector,
) -> Vec<RecordExport> {
    let day = date.format("%Y-%m-%d").to_string();

    records
        .iter()
        .filter(|r| r.date == day)
        .filter(|r| shift.matches(Shift::from_db_str(&r.shift)))
        .cloned()
        .collect()
}

/// Planned quantity: litres to refuel, "Full" when the tank is already
/// exhausted by the plan, "-" otherwise.
pub fn planned_quantity(r: &RecordExport) -> String {
    if r.consumption > 0.0 {
        format!("{:.2}", r.consumption)
    } else if r.buffer_stock <= 0.0 {
        "Full".to_string()
    } else {
        "-".to_string()
    }
}

pub fn report_title(date: NaiveDate) -> String {
    format!(
        "PLAN REFUELING UNIT TRACK {}",
        date.format("%b %Y").to_string().to_uppercase()
    )
}

pub fn report_subtitle(date: NaiveDate, shift: ShiftSelector) -> String {
    format!("{} Date: {}", shift.display_window(), date.format("%d %b %Y"))
}

pub fn default_report_file(date: NaiveDate, shift: ShiftSelector) -> PathBuf {
    PathBuf::from(format!(
        "Plan_Refueling_{}_{}.pdf",
        date.format("%d_%b_%Y"),
        shift.file_tag()
    ))
}

pub fn report_rows(records: &[RecordExport]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.unit.clone(),
                if r.shift.is_empty() {
                    "Unknown".to_string()
                } else {
                    r.shift.clone()
                },
                format!("{:.2}", r.hm_start),
                format!("{:.2}", r.delta),
                planned_quantity(r),
                String::new(),
            ]
        })
        .collect()
}

/// Render the plan for `date`/`shift` to `path`.
/// Fails with `NoRecordsForReport` when nothing matches; no file is written then.
pub fn write_report(
    records: &[RecordExport],
    date: NaiveDate,
    shift: ShiftSelector,
    path: &Path,
) -> AppResult<usize> {
    let selected = select_for_report(records, date, shift);

    if selected.is_empty() {
        return Err(AppError::NoRecordsForReport(format!(
            "{} ({})",
            date.format("%d %b %Y"),
            shift.display_window()
        )));
    }

    info(format!("Writing refueling plan: {}", path.display()));

    let mut pdf = PdfManager::portrait();
    pdf.write_table(
        &report_title(date),
        Some(&report_subtitle(date, shift)),
        &REPORT_HEADERS,
        &report_rows(&selected),
    );

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF report error: {e}")))?;

    notify_export_success("Refueling plan", path);
    Ok(selected.len())
}
