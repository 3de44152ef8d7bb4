// src/export/model.rs

use crate::models::record::Record;
use crate::models::shift::ShiftSelector;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Flat record shape shared by every export format and by reset snapshots.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub id: i64,
    pub date: String,
    pub unit: String,
    pub shift: String,
    pub hm_start: f64,
    pub hm_end: f64,
    pub delta: f64,
    pub ration_rate: f64,
    pub consumption: f64,
    pub tank_capacity: f64,
    pub buffer_stock: f64,
    pub is_latest: bool,
    pub recorded_by: String,
}

impl From<&Record> for RecordExport {
    fn from(r: &Record) -> Self {
        Self {
            id: r.id,
            date: r.date_str(),
            unit: r.unit.clone(),
            shift: r.shift_label().to_string(),
            hm_start: r.starting_reading,
            hm_end: r.ending_reading,
            delta: r.delta,
            ration_rate: r.ration_rate,
            consumption: r.consumption,
            tank_capacity: r.tank_capacity,
            buffer_stock: r.buffer_stock,
            is_latest: r.is_latest,
            recorded_by: r.recorded_by.clone(),
        }
    }
}

/// Narrowing applied to a snapshot before export.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub unit: Option<String>,
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub shift: Option<ShiftSelector>,
}

impl ExportFilter {
    pub fn matches(&self, r: &Record) -> bool {
        if let Some(u) = &self.unit
            && &r.unit != u
        {
            return false;
        }

        if let Some((from, to)) = self.range
            && (r.date < from || r.date > to)
        {
            return false;
        }

        match self.shift {
            Some(sel) => sel.matches(r.shift),
            None => true,
        }
    }
}

/// Header per CSV / JSON / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
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
        "latest",
        "recorded_by",
    ]
}

/// Record as a row of strings (for XLSX cells and PDF tables).
pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        e.unit.clone(),
        e.shift.clone(),
        format!("{:.2}", e.hm_start),
        format!("{:.2}", e.hm_end),
        format!("{:.2}", e.delta),
        format!("{}", e.ration_rate),
        format!("{:.2}", e.consumption),
        format!("{:.2}", e.tank_capacity),
        format!("{:.2}", e.buffer_stock),
        if e.is_latest { "*".into() } else { String::new() },
        e.recorded_by.clone(),
    ]
}

pub(crate) fn records_to_table(records: &[RecordExport]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}
