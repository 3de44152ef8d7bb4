use super::shift::{Shift, shift_rank};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,                // ⇔ records.id, insertion sequence (0 until stored)
    pub date: NaiveDate,        // ⇔ records.date (TEXT "YYYY-MM-DD")
    pub unit: String,           // ⇔ records.unit
    pub shift: Option<Shift>,   // ⇔ records.shift ('Shift 1' | 'Shift 2' | '')
    pub starting_reading: f64,  // ⇔ records.hm_start
    pub ending_reading: f64,    // ⇔ records.hm_end
    pub delta: f64,             // ⇔ records.delta
    pub ration_rate: f64,       // ⇔ records.ration_rate
    pub consumption: f64,       // ⇔ records.consumption
    pub tank_capacity: f64,     // ⇔ records.tank_capacity
    pub buffer_stock: f64,      // ⇔ records.buffer_stock
    pub is_latest: bool,        // ⇔ records.is_latest
    pub recorded_by: String,    // ⇔ records.recorded_by
    pub created_at: String,     // ⇔ records.created_at (RFC 3339)
}

impl Record {
    /// Build a not-yet-stored record from already derived figures.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        unit: &str,
        shift: Option<Shift>,
        starting_reading: f64,
        ending_reading: f64,
        delta: f64,
        ration_rate: f64,
        consumption: f64,
        tank_capacity: f64,
        buffer_stock: f64,
        recorded_by: &str,
    ) -> Self {
        Self {
            id: 0,
            date,
            unit: unit.to_string(),
            shift,
            starting_reading,
            ending_reading,
            delta,
            ration_rate,
            consumption,
            tank_capacity,
            buffer_stock,
            is_latest: true,
            recorded_by: recorded_by.to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn shift_label(&self) -> &'static str {
        self.shift.map(|s| s.label()).unwrap_or("")
    }

    pub fn shift_rank(&self) -> u8 {
        shift_rank(self.shift)
    }

    /// Log order: date, then shift rank, then insertion id.
    pub fn log_order(a: &Record, b: &Record) -> Ordering {
        a.date
            .cmp(&b.date)
            .then(a.shift_rank().cmp(&b.shift_rank()))
            .then(a.id.cmp(&b.id))
    }
}
