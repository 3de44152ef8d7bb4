// src/export/excel_date.rs

use chrono::NaiveDate;

/// Interpret an ISO `YYYY-MM-DD` string as an Excel date serial.
/// Returns the number format to apply together with the serial.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if s.len() != 10 {
        return None;
    }

    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;

    Some(("yyyy-mm-dd", (d - excel_epoch).num_days() as f64))
}
