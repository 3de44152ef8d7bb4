//! Formatting utilities used for CLI and export outputs.

/// Hour-meter reading with two decimals.
pub fn fmt_reading(v: f64) -> String {
    format!("{:.2}", v)
}

/// Litres with two decimals and a unit suffix.
pub fn fmt_litres(v: f64) -> String {
    format!("{:.2} L", v)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}
