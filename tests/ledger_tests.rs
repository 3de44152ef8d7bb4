use chrono::NaiveDate;
use rationlog::core::calculator;
use rationlog::core::ledger::{AppendWarning, Ledger, LedgerSettings};
use rationlog::core::store::{LedgerStore, MemoryStore};
use rationlog::db::initialize::init_db;
use rationlog::db::pool::DbPool;
use rationlog::db::store::SqliteStore;
use rationlog::errors::AppError;
use rationlog::models::caller::{Caller, Role};
use rationlog::models::record::Record;
use rationlog::models::shift::Shift;
use rationlog::models::unit::{UnitCatalog, UnitDefaults, UnitSpec};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn catalog() -> UnitCatalog {
    UnitCatalog::new(
        vec![
            UnitSpec::new("DR0011", 62.0, 800.0, 100.0),
            UnitSpec::new("EX2017", 93.0, 1380.0, 46028.0),
        ],
        UnitDefaults::default(),
        true,
    )
}

fn memory_ledger() -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new(), catalog(), LedgerSettings::default())
}

fn sqlite_ledger() -> Ledger<SqliteStore> {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    Ledger::new(SqliteStore::new(pool), catalog(), LedgerSettings::default())
}

fn admin() -> Caller {
    Caller::local_admin()
}

// ---------------------------------------------------------------
// Running reading
// ---------------------------------------------------------------

#[test]
fn running_reading_defaults_to_initial_reading() {
    let ledger = memory_ledger();
    assert_eq!(ledger.get_running_reading("DR0011").unwrap(), 100.0);
    assert_eq!(ledger.get_running_reading("EX2017").unwrap(), 46028.0);
}

#[test]
fn running_reading_of_unknown_unit_is_default() {
    let ledger = memory_ledger();
    assert_eq!(ledger.get_running_reading("NOPE01").unwrap(), 0.0);
}

#[test]
fn unit_codes_are_normalized() {
    let mut ledger = memory_ledger();
    ledger
        .append_record(&admin(), " dr0011 ", 101.0, day("2024-01-01"), None)
        .unwrap();
    assert_eq!(ledger.get_running_reading("DR0011").unwrap(), 101.0);
}

// ---------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------

fn dr0011_example<S: LedgerStore>(ledger: &mut Ledger<S>) {
    let outcome = ledger
        .append_record(&admin(), "DR0011", 110.0, day("2024-01-01"), Some(Shift::First))
        .unwrap();

    let r = &outcome.record;
    assert_eq!(r.starting_reading, 100.0);
    assert_eq!(r.ending_reading, 110.0);
    assert_eq!(r.delta, 10.0);
    assert_eq!(r.consumption, 620.0);
    assert_eq!(r.buffer_stock, 180.0);
    assert_eq!(r.ration_rate, 62.0);
    assert_eq!(r.tank_capacity, 800.0);
    assert!(r.is_latest);
    assert_eq!(r.recorded_by, "local");
    assert!(outcome.warnings.is_empty());

    let err = ledger
        .append_record(&admin(), "DR0011", 105.0, day("2024-01-01"), Some(Shift::Second))
        .unwrap_err();

    match &err {
        AppError::ReadingNotIncreasing { ending, starting } => {
            assert_eq!(*ending, 105.0);
            assert_eq!(*starting, 110.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("105.00"), "{msg}");
    assert!(msg.contains("110.00"), "{msg}");

    assert_eq!(ledger.export(None).unwrap().len(), 1);
}

#[test]
fn dr0011_example_in_memory() {
    dr0011_example(&mut memory_ledger());
}

#[test]
fn dr0011_example_on_sqlite() {
    dr0011_example(&mut sqlite_ledger());
}

// ---------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------

#[test]
fn figures_are_rounded_to_two_decimals() {
    let mut ledger = memory_ledger();
    let r = ledger
        .append_record(&admin(), "DR0011", 100.333, day("2024-01-01"), None)
        .unwrap()
        .record;

    assert_eq!(r.ending_reading, 100.33);
    assert_eq!(r.delta, 0.33);
    assert_eq!(r.consumption, 20.46);
    assert_eq!(r.buffer_stock, 779.54);
}

#[test]
fn equal_reading_is_rejected_and_log_unchanged() {
    let mut ledger = sqlite_ledger();
    let err = ledger
        .append_record(&admin(), "DR0011", 100.0, day("2024-01-01"), None)
        .unwrap_err();

    assert!(matches!(err, AppError::ReadingNotIncreasing { .. }));
    assert!(ledger.export(None).unwrap().is_empty());
}

#[test]
fn unknown_unit_is_rejected_when_strict() {
    let mut ledger = memory_ledger();
    let err = ledger
        .append_record(&admin(), "XX0001", 10.0, day("2024-01-01"), None)
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownUnit(ref u) if u == "XX0001"));
}

#[test]
fn unknown_unit_uses_defaults_when_not_strict() {
    let catalog = UnitCatalog::new(Vec::new(), UnitDefaults::default(), false);
    let mut ledger = Ledger::new(MemoryStore::new(), catalog, LedgerSettings::default());

    let r = ledger
        .append_record(&admin(), "LD0152", 2.0, day("2024-01-01"), None)
        .unwrap()
        .record;

    assert_eq!(r.starting_reading, 0.0);
    assert_eq!(r.ration_rate, 62.0);
    assert_eq!(r.consumption, 124.0);
    assert_eq!(r.buffer_stock, -124.0);
}

#[test]
fn negative_reading_is_rejected() {
    let mut ledger = memory_ledger();
    let err = ledger
        .append_record(&admin(), "DR0011", -1.0, day("2024-01-01"), None)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReading(_)));
}

#[test]
fn large_jump_is_accepted_with_warning() {
    let mut ledger = memory_ledger();
    let outcome = ledger
        .append_record(&admin(), "DR0011", 150.0, day("2024-01-01"), None)
        .unwrap();

    assert_eq!(outcome.record.delta, 50.0);
    assert_eq!(
        outcome.warnings,
        vec![AppendWarning::ImplausibleJump {
            delta: 50.0,
            limit: 24.0
        }]
    );
}

// ---------------------------------------------------------------
// Chaining and ordering
// ---------------------------------------------------------------

fn chained_appends<S: LedgerStore>(ledger: &mut Ledger<S>) {
    let endings = [101.5, 103.25, 110.0, 121.75];
    for (i, e) in endings.iter().enumerate() {
        let d = day("2024-02-01") + chrono::Duration::days(i as i64);
        ledger
            .append_record(&admin(), "DR0011", *e, d, Some(Shift::First))
            .unwrap();
    }

    assert_eq!(ledger.get_running_reading("DR0011").unwrap(), 121.75);

    let log = ledger.export(Some("DR0011")).unwrap();
    assert_eq!(log.len(), endings.len());
    for pair in log.windows(2) {
        assert_eq!(pair[1].hm_start, pair[0].hm_end);
    }
    assert_eq!(log.iter().filter(|r| r.is_latest).count(), 1);
    assert!(log[log.len() - 1].is_latest);
}

#[test]
fn n_appends_chain_in_memory() {
    chained_appends(&mut memory_ledger());
}

#[test]
fn n_appends_chain_on_sqlite() {
    chained_appends(&mut sqlite_ledger());
}

fn out_of_order_dates<S: LedgerStore>(ledger: &mut Ledger<S>) {
    ledger
        .append_record(&admin(), "DR0011", 110.0, day("2024-01-02"), Some(Shift::Second))
        .unwrap();
    ledger
        .append_record(&admin(), "DR0011", 120.0, day("2024-01-01"), Some(Shift::First))
        .unwrap();

    let log = ledger.export(None).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].date, "2024-01-01");
    assert_eq!(log[0].shift, "Shift 1");
    assert_eq!(log[1].date, "2024-01-02");
    assert_eq!(log[1].shift, "Shift 2");
}

#[test]
fn log_is_ordered_by_date_then_shift_in_memory() {
    out_of_order_dates(&mut memory_ledger());
}

#[test]
fn log_is_ordered_by_date_then_shift_on_sqlite() {
    out_of_order_dates(&mut sqlite_ledger());
}

#[test]
fn unmarked_shift_sorts_after_both_shifts() {
    let mut ledger = sqlite_ledger();
    ledger
        .append_record(&admin(), "DR0011", 101.0, day("2024-01-01"), None)
        .unwrap();
    ledger
        .append_record(&admin(), "DR0011", 102.0, day("2024-01-01"), Some(Shift::Second))
        .unwrap();
    ledger
        .append_record(&admin(), "DR0011", 103.0, day("2024-01-01"), Some(Shift::First))
        .unwrap();

    let shifts: Vec<String> = ledger
        .export(None)
        .unwrap()
        .into_iter()
        .map(|r| r.shift)
        .collect();
    assert_eq!(shifts, vec!["Shift 1", "Shift 2", ""]);
}

#[test]
fn units_do_not_share_readings() {
    let mut ledger = memory_ledger();
    ledger
        .append_record(&admin(), "DR0011", 120.0, day("2024-01-01"), None)
        .unwrap();
    let r = ledger
        .append_record(&admin(), "EX2017", 46030.0, day("2024-01-01"), None)
        .unwrap()
        .record;

    assert_eq!(r.starting_reading, 46028.0);
    assert_eq!(ledger.export(Some("dr0011")).unwrap().len(), 1);
}

// ---------------------------------------------------------------
// Reset
// ---------------------------------------------------------------

fn reset_roundtrip<S: LedgerStore>(ledger: &mut Ledger<S>) {
    ledger
        .append_record(&admin(), "DR0011", 110.0, day("2024-01-01"), Some(Shift::First))
        .unwrap();
    ledger
        .append_record(&admin(), "EX2017", 46040.25, day("2024-01-01"), None)
        .unwrap();

    let before = ledger.export(None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("nested").join("backup.csv");

    let report = ledger.reset_log(&admin(), &backup).unwrap();
    assert_eq!(report.cleared, 2);
    assert_eq!(report.backup_path, backup);

    assert!(ledger.export(None).unwrap().is_empty());
    assert_eq!(ledger.get_running_reading("DR0011").unwrap(), 100.0);

    let restored = Ledger::<S>::read_backup(&backup).unwrap();
    assert_eq!(restored, before);
}

#[test]
fn reset_backs_up_then_clears_in_memory() {
    reset_roundtrip(&mut memory_ledger());
}

#[test]
fn reset_backs_up_then_clears_on_sqlite() {
    reset_roundtrip(&mut sqlite_ledger());
}

#[test]
fn reset_requires_admin() {
    let mut ledger = memory_ledger();
    ledger
        .append_record(&admin(), "DR0011", 110.0, day("2024-01-01"), None)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.csv");
    let operator = Caller::new("budi", Role::Operator);

    let err = ledger.reset_log(&operator, &backup).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(!backup.exists());
    assert_eq!(ledger.export(None).unwrap().len(), 1);
}

#[test]
fn failed_backup_keeps_the_log() {
    let mut ledger = sqlite_ledger();
    ledger
        .append_record(&admin(), "DR0011", 110.0, day("2024-01-01"), None)
        .unwrap();

    // a directory cannot be opened as the snapshot file
    let dir = tempfile::tempdir().unwrap();
    let err = ledger.reset_log(&admin(), dir.path());

    assert!(err.is_err());
    assert_eq!(ledger.export(None).unwrap().len(), 1);
}

#[test]
fn operator_appends_are_attributed() {
    let mut ledger = memory_ledger();
    let operator = Caller::new("budi", Role::Operator);
    let r = ledger
        .append_record(&operator, "DR0011", 104.0, day("2024-01-01"), None)
        .unwrap()
        .record;
    assert_eq!(r.recorded_by, "budi");
}

#[test]
fn store_clear_empties_the_log() {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    let mut store = SqliteStore::new(pool);
    assert_eq!(store.clear().unwrap(), 0);

    let mut memory = MemoryStore::new();
    memory
        .append_with("DR0011", |latest| {
            assert!(latest.is_none());
            Ok(Record::new(
                day("2024-01-01"),
                "DR0011",
                None,
                100.0,
                101.0,
                1.0,
                62.0,
                62.0,
                800.0,
                738.0,
                "local",
            ))
        })
        .unwrap();
    assert_eq!(memory.clear().unwrap(), 1);
    assert!(memory.read_all().unwrap().is_empty());
}

// ---------------------------------------------------------------
// Plausibility boundary
// ---------------------------------------------------------------

#[test]
fn jump_of_exactly_one_day_is_not_flagged() {
    let mut ledger = memory_ledger();
    let out = ledger
        .append_record(&admin(), "DR0011", 124.0, day("2024-01-01"), None)
        .unwrap();
    assert_eq!(out.record.delta, 24.0);
    assert!(out.warnings.is_empty());

    let mut ledger = sqlite_ledger();
    let out = ledger
        .append_record(&admin(), "DR0011", 124.01, day("2024-01-01"), None)
        .unwrap();
    assert_eq!(
        out.warnings,
        vec![AppendWarning::ImplausibleJump {
            delta: 24.01,
            limit: 24.0
        }]
    );
}

#[test]
fn fractional_readings_at_the_limit_are_not_flagged() {
    // 128.02 - 104.02 is 24.000000000000014 in f64
    assert!(128.02_f64 - 104.02 > 24.0);
    assert!(!calculator::is_implausible(104.02, 128.02, 24.0));

    let mut ledger = memory_ledger();
    ledger
        .append_record(&admin(), "DR0011", 104.02, day("2024-01-01"), None)
        .unwrap();
    let out = ledger
        .append_record(&admin(), "DR0011", 128.02, day("2024-01-02"), None)
        .unwrap();
    assert_eq!(out.record.delta, 24.0);
    assert!(out.warnings.is_empty());
}

// ---------------------------------------------------------------
// Shared database file
// ---------------------------------------------------------------

#[test]
fn two_connections_chain_onto_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite");
    let path = path.to_str().unwrap();

    let first = DbPool::new(path).unwrap();
    init_db(&first.conn).unwrap();
    let second = DbPool::new(path).unwrap();

    let mut a = Ledger::new(SqliteStore::new(first), catalog(), LedgerSettings::default());
    let mut b = Ledger::new(SqliteStore::new(second), catalog(), LedgerSettings::default());

    a.append_record(&admin(), "DR0011", 110.0, day("2024-01-01"), None)
        .unwrap();
    let out = b
        .append_record(&admin(), "DR0011", 115.0, day("2024-01-02"), None)
        .unwrap();
    assert_eq!(out.record.starting_reading, 110.0);
    assert_eq!(out.record.delta, 5.0);

    // a last wrote 110 but must chain onto b's 115
    assert!(matches!(
        a.append_record(&admin(), "DR0011", 112.0, day("2024-01-03"), None),
        Err(AppError::ReadingNotIncreasing { .. })
    ));

    assert_eq!(a.store().read_all().unwrap().len(), 2);
    assert_eq!(b.store().read_all().unwrap().len(), 2);
    assert_eq!(a.get_running_reading("DR0011").unwrap(), 115.0);
}

// ---------------------------------------------------------------
// Reset of an empty log
// ---------------------------------------------------------------

#[test]
fn reset_of_empty_log_writes_header_only_snapshot() {
    let dir = tempfile::tempdir().unwrap();

    let backup = dir.path().join("empty_memory.csv");
    let report = memory_ledger().reset_log(&admin(), &backup).unwrap();
    assert_eq!(report.cleared, 0);
    let text = std::fs::read_to_string(&backup).unwrap();
    assert!(text.starts_with("id,date,unit,shift,hm_start,hm_end,delta"));
    assert_eq!(text.lines().count(), 1);
    assert!(Ledger::<MemoryStore>::read_backup(&backup).unwrap().is_empty());

    let backup = dir.path().join("empty_sqlite.csv");
    let report = sqlite_ledger().reset_log(&admin(), &backup).unwrap();
    assert_eq!(report.cleared, 0);
    assert!(Ledger::<SqliteStore>::read_backup(&backup).unwrap().is_empty());
}
