//! SQLite implementation of the ledger store.

use crate::core::store::LedgerStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::models::shift::Shift;
use crate::models::unit::UnitCatalog;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};

const SELECT_RECORDS: &str = "SELECT id, date, unit, shift, hm_start, hm_end, delta,
        ration_rate, consumption, tank_capacity, buffer_stock,
        is_latest, recorded_by, created_at
     FROM records";

const LOG_ORDER: &str = "ORDER BY date ASC, shift_rank ASC, id ASC";

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

fn map_row(row: &Row) -> rusqlite::Result<Record> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let shift_str: String = row.get("shift")?;

    Ok(Record {
        id: row.get("id")?,
        date,
        unit: row.get("unit")?,
        shift: Shift::from_db_str(&shift_str),
        starting_reading: row.get("hm_start")?,
        ending_reading: row.get("hm_end")?,
        delta: row.get("delta")?,
        ration_rate: row.get("ration_rate")?,
        consumption: row.get("consumption")?,
        tank_capacity: row.get("tank_capacity")?,
        buffer_stock: row.get("buffer_stock")?,
        is_latest: row.get::<_, i64>("is_latest")? == 1,
        recorded_by: row.get("recorded_by")?,
        created_at: row.get("created_at")?,
    })
}

fn query_records(conn: &Connection, sql: &str, unit: Option<&str>) -> AppResult<Vec<Record>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = match unit {
        Some(u) => stmt.query_map([u], map_row)?,
        None => stmt.query_map([], map_row)?,
    };

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn latest(conn: &Connection, unit: &str) -> AppResult<Option<Record>> {
    let sql = format!(
        "{SELECT_RECORDS} WHERE unit = ?1
         ORDER BY date DESC, shift_rank DESC, id DESC
         LIMIT 1"
    );
    Ok(conn.query_row(&sql, [unit], map_row).optional()?)
}

fn insert_record(conn: &Connection, r: &Record) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO records (date, unit, shift, shift_rank, hm_start, hm_end, delta,
                              ration_rate, consumption, tank_capacity, buffer_stock,
                              is_latest, recorded_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            r.date_str(),
            r.unit,
            r.shift_label(),
            r.shift_rank(),
            r.starting_reading,
            r.ending_reading,
            r.delta,
            r.ration_rate,
            r.consumption,
            r.tank_capacity,
            r.buffer_stock,
            if r.is_latest { 1 } else { 0 },
            r.recorded_by,
            r.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl LedgerStore for SqliteStore {
    fn read_all(&self) -> AppResult<Vec<Record>> {
        query_records(
            &self.pool.conn,
            &format!("{SELECT_RECORDS} {LOG_ORDER}"),
            None,
        )
    }

    fn read_unit(&self, unit: &str) -> AppResult<Vec<Record>> {
        let unit = UnitCatalog::normalize(unit);
        query_records(
            &self.pool.conn,
            &format!("{SELECT_RECORDS} WHERE unit = ?1 {LOG_ORDER}"),
            Some(&unit),
        )
    }

    fn latest_for_unit(&self, unit: &str) -> AppResult<Option<Record>> {
        latest(&self.pool.conn, &UnitCatalog::normalize(unit))
    }

    fn append_with<F>(&mut self, unit: &str, build: F) -> AppResult<Record>
    where
        F: FnOnce(Option<&Record>) -> AppResult<Record>,
    {
        let unit = UnitCatalog::normalize(unit);

        // IMMEDIATE takes the write lock up front: the latest record read
        // below cannot change before commit.
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let prev = latest(&tx, &unit)?;
        let mut record = build(prev.as_ref())?;
        record.is_latest = true;

        tx.execute(
            "UPDATE records SET is_latest = 0 WHERE unit = ?1 AND is_latest = 1",
            [&record.unit],
        )?;
        record.id = insert_record(&tx, &record)?;

        tx.commit()?;
        Ok(record)
    }

    fn clear_with<F>(&mut self, before: F) -> AppResult<usize>
    where
        F: FnOnce(&[Record]) -> AppResult<()>,
    {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let snapshot = query_records(&tx, &format!("{SELECT_RECORDS} {LOG_ORDER}"), None)?;
        before(&snapshot)?;

        let cleared = tx.execute("DELETE FROM records", [])?;
        tx.commit()?;
        Ok(cleared)
    }
}
