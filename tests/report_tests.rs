use chrono::NaiveDate;
use rationlog::export::RecordExport;
use rationlog::export::range::parse_range;
use rationlog::export::report::{
    default_report_file, planned_quantity, report_subtitle, report_title, select_for_report,
    write_report,
};
use rationlog::errors::AppError;
use rationlog::models::shift::{Shift, ShiftSelector};
use std::path::PathBuf;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rec(id: i64, date: &str, unit: &str, shift: &str, consumption: f64, buffer: f64) -> RecordExport {
    RecordExport {
        id,
        date: date.to_string(),
        unit: unit.to_string(),
        shift: shift.to_string(),
        hm_start: 100.0,
        hm_end: 110.0,
        delta: 10.0,
        ration_rate: 62.0,
        consumption,
        tank_capacity: 800.0,
        buffer_stock: buffer,
        is_latest: true,
        recorded_by: "local".to_string(),
    }
}

fn sample() -> Vec<RecordExport> {
    vec![
        rec(1, "2024-03-05", "DZ3007", "Shift 1", 520.0, 480.0),
        rec(2, "2024-03-05", "EX2017", "Shift 2", 930.0, 450.0),
        rec(3, "2024-03-05", "DZ3014", "", 52.0, 948.0),
        rec(4, "2024-03-06", "DZ3007", "Shift 1", 104.0, 896.0),
    ]
}

#[test]
fn report_selects_date_and_shift() {
    let records = sample();

    let s1 = select_for_report(&records, day("2024-03-05"), ShiftSelector::Only(Shift::First));
    assert_eq!(s1.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);

    let s2 = select_for_report(&records, day("2024-03-05"), ShiftSelector::Only(Shift::Second));
    assert_eq!(s2.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

    let both = select_for_report(&records, day("2024-03-05"), ShiftSelector::Both);
    assert_eq!(both.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn planned_quantity_rules() {
    assert_eq!(planned_quantity(&rec(1, "2024-03-05", "A", "", 620.0, 180.0)), "620.00");
    assert_eq!(planned_quantity(&rec(1, "2024-03-05", "A", "", 0.0, 0.0)), "Full");
    assert_eq!(planned_quantity(&rec(1, "2024-03-05", "A", "", 0.0, 10.0)), "-");
}

#[test]
fn report_titles_and_file_names() {
    let d = day("2024-03-05");
    assert_eq!(report_title(d), "PLAN REFUELING UNIT TRACK MAR 2024");
    assert_eq!(
        report_subtitle(d, ShiftSelector::Only(Shift::First)),
        "Shift 1 (06:00-18:00 WITA) Date: 05 Mar 2024"
    );
    assert_eq!(
        default_report_file(d, ShiftSelector::Both),
        PathBuf::from("Plan_Refueling_05_Mar_2024_Both_Shifts.pdf")
    );
    assert_eq!(
        default_report_file(d, ShiftSelector::Only(Shift::Second)),
        PathBuf::from("Plan_Refueling_05_Mar_2024_Shift2_1800-0600.pdf")
    );
}

#[test]
fn empty_selection_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.pdf");

    let err = write_report(&sample(), day("2024-04-01"), ShiftSelector::Both, &path).unwrap_err();
    assert!(matches!(err, AppError::NoRecordsForReport(_)));
    assert!(!path.exists());
}

#[test]
fn report_is_written_as_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.pdf");

    let n = write_report(&sample(), day("2024-03-05"), ShiftSelector::Both, &path).unwrap();
    assert_eq!(n, 3);

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn shift_selector_parsing() {
    assert_eq!(ShiftSelector::from_code("both"), Some(ShiftSelector::Both));
    assert_eq!(ShiftSelector::from_code("1"), Some(ShiftSelector::Only(Shift::First)));
    assert_eq!(ShiftSelector::from_code("Shift 2"), Some(ShiftSelector::Only(Shift::Second)));
    assert_eq!(ShiftSelector::from_code("3"), None);
}

#[test]
fn range_forms() {
    assert_eq!(parse_range("2024").unwrap(), (day("2024-01-01"), day("2024-12-31")));
    assert_eq!(parse_range("2024-02").unwrap(), (day("2024-02-01"), day("2024-02-29")));
    assert_eq!(
        parse_range("2024-03-05:2024-03-09").unwrap(),
        (day("2024-03-05"), day("2024-03-09"))
    );
    assert!(parse_range("2024-03:2024-03-09").is_err());
    assert!(parse_range("2024-05:2024-03").is_err());
    assert!(parse_range("yesterday").is_err());
}
