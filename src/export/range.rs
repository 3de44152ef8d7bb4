// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse a `--range` expression into inclusive date bounds.
///
/// Accepted forms:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above as `start:end`, both sides with the same granularity
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "range '{r}': start and end must have the same format"
            )));
        }

        let (from, _) = period_bounds(start)?;
        let (_, to) = period_bounds(end)?;

        if from > to {
            return Err(AppError::InvalidDate(format!(
                "range '{r}': start is after end"
            )));
        }
        return Ok((from, to));
    }

    period_bounds(r)
}

/// First and last day covered by a single period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(format!("unsupported range '{p}'"));

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((d1, last_day_of_month(d1).ok_or_else(invalid)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
