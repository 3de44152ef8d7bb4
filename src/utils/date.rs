use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional date argument, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> Option<NaiveDate> {
    match s {
        Some(v) => parse_date(v),
        None => Some(today()),
    }
}
