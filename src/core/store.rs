//! Append-only ledger storage.
//!
//! A store keeps records ordered by (date, shift rank, id) per unit and
//! offers one atomic write primitive, `append_with`: the unit's latest
//! record is read, the new record is built from it and inserted, all under
//! the same exclusive write. `clear_with` does the same for bulk resets.

use crate::errors::AppResult;
use crate::models::record::Record;
use crate::models::unit::UnitCatalog;

pub trait LedgerStore {
    /// Whole log in log order.
    fn read_all(&self) -> AppResult<Vec<Record>>;

    /// One unit's records in log order.
    fn read_unit(&self, unit: &str) -> AppResult<Vec<Record>>;

    /// Last record of the unit in log order, if any.
    fn latest_for_unit(&self, unit: &str) -> AppResult<Option<Record>>;

    /// Atomically derive and insert a record for `unit`.
    ///
    /// `build` receives the unit's latest record as seen inside the write.
    /// If it fails nothing is written. On success the stored record (with
    /// its assigned id) is returned and every earlier record of the unit
    /// loses its `is_latest` flag.
    fn append_with<F>(&mut self, unit: &str, build: F) -> AppResult<Record>
    where
        F: FnOnce(Option<&Record>) -> AppResult<Record>;

    /// Atomically hand the full log to `before`, then empty the store.
    /// If `before` fails the log is left untouched.
    fn clear_with<F>(&mut self, before: F) -> AppResult<usize>
    where
        F: FnOnce(&[Record]) -> AppResult<()>;

    fn clear(&mut self) -> AppResult<usize> {
        self.clear_with(|_| Ok(()))
    }
}

/// Vec-backed store. `&mut self` is the write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut records: Vec<Record>) -> Vec<Record> {
        records.sort_by(Record::log_order);
        records
    }
}

impl LedgerStore for MemoryStore {
    fn read_all(&self) -> AppResult<Vec<Record>> {
        Ok(Self::sorted(self.records.clone()))
    }

    fn read_unit(&self, unit: &str) -> AppResult<Vec<Record>> {
        let unit = UnitCatalog::normalize(unit);
        Ok(Self::sorted(
            self.records
                .iter()
                .filter(|r| r.unit == unit)
                .cloned()
                .collect(),
        ))
    }

    fn latest_for_unit(&self, unit: &str) -> AppResult<Option<Record>> {
        Ok(self.read_unit(unit)?.pop())
    }

    fn append_with<F>(&mut self, unit: &str, build: F) -> AppResult<Record>
    where
        F: FnOnce(Option<&Record>) -> AppResult<Record>,
    {
        let latest = self.latest_for_unit(unit)?;
        let mut record = build(latest.as_ref())?;

        self.next_id += 1;
        record.id = self.next_id;
        record.is_latest = true;

        for r in self.records.iter_mut().filter(|r| r.unit == record.unit) {
            r.is_latest = false;
        }

        self.records.push(record.clone());
        Ok(record)
    }

    fn clear_with<F>(&mut self, before: F) -> AppResult<usize>
    where
        F: FnOnce(&[Record]) -> AppResult<()>,
    {
        let snapshot = self.read_all()?;
        before(&snapshot)?;

        let cleared = self.records.len();
        self.records.clear();
        Ok(cleared)
    }
}
