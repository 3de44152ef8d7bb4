use crate::core::calculator::{self, round2};
use crate::core::store::LedgerStore;
use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportFilter, RecordExport};
use crate::export::snapshot;
use crate::models::caller::Caller;
use crate::models::record::Record;
use crate::models::shift::Shift;
use crate::models::unit::UnitCatalog;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAUSIBLE_DELTA: f64 = 24.0;

#[derive(Debug, Clone, Copy)]
pub struct LedgerSettings {
    /// Largest hour-meter jump accepted without a warning.
    pub plausible_delta: f64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            plausible_delta: DEFAULT_PLAUSIBLE_DELTA,
        }
    }
}

/// Advisory findings attached to an accepted append.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendWarning {
    ImplausibleJump { delta: f64, limit: f64 },
}

impl fmt::Display for AppendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendWarning::ImplausibleJump { delta, limit } => write!(
                f,
                "Hour-meter jump of {:.2} exceeds {:.2} hours. Make sure the reading is correct.",
                delta, limit
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppendOutcome {
    pub record: Record,
    pub warnings: Vec<AppendWarning>,
}

#[derive(Debug, Clone)]
pub struct ResetReport {
    pub backup_path: PathBuf,
    pub cleared: usize,
}

/// Ration ledger: derives consumption and buffer stock for each new
/// hour-meter reading and appends it to the unit's log.
pub struct Ledger<S: LedgerStore> {
    store: S,
    catalog: UnitCatalog,
    settings: LedgerSettings,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S, catalog: UnitCatalog, settings: LedgerSettings) -> Self {
        Self {
            store,
            catalog,
            settings,
        }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ending reading of the unit's latest record, or its initial reading.
    pub fn get_running_reading(&self, unit: &str) -> AppResult<f64> {
        let code = UnitCatalog::normalize(unit);
        let latest = self.store.latest_for_unit(&code)?;
        Ok(running_reading(&self.catalog, &code, latest.as_ref()))
    }

    /// Append a new reading for `unit`.
    ///
    /// The starting reading is resolved inside the store's atomic write, so
    /// it always chains onto the record that was latest at commit time.
    pub fn append_record(
        &mut self,
        caller: &Caller,
        unit: &str,
        ending_reading: f64,
        date: NaiveDate,
        shift: Option<Shift>,
    ) -> AppResult<AppendOutcome> {
        let code = UnitCatalog::normalize(unit);

        if code.is_empty() {
            return Err(AppError::UnknownUnit("(empty)".into()));
        }
        if self.catalog.is_strict() && !self.catalog.is_allowed(&code) {
            return Err(AppError::UnknownUnit(code));
        }
        if !ending_reading.is_finite() || ending_reading < 0.0 {
            return Err(AppError::InvalidReading(ending_reading.to_string()));
        }

        let catalog = &self.catalog;
        let limit = self.settings.plausible_delta;
        let mut warnings = Vec::new();

        let record = self.store.append_with(&code, |latest| {
            let starting = round2(running_reading(catalog, &code, latest));
            let ending = round2(ending_reading);

            if ending <= starting {
                return Err(AppError::ReadingNotIncreasing { ending, starting });
            }

            if calculator::is_implausible(starting, ending, limit) {
                warnings.push(AppendWarning::ImplausibleJump {
                    delta: round2(ending - starting),
                    limit,
                });
            }

            let rate = catalog.ration_rate(&code);
            let capacity = round2(catalog.tank_capacity(&code));
            let figures = calculator::compute(starting, ending, rate, capacity);

            Ok(Record::new(
                date,
                &code,
                shift,
                starting,
                ending,
                figures.delta,
                rate,
                figures.consumption,
                capacity,
                figures.buffer_stock,
                &caller.username,
            ))
        })?;

        Ok(AppendOutcome { record, warnings })
    }

    /// Ordered snapshot of the whole log, or of one unit.
    pub fn export(&self, unit: Option<&str>) -> AppResult<Vec<RecordExport>> {
        let filter = ExportFilter {
            unit: unit.map(UnitCatalog::normalize),
            ..ExportFilter::default()
        };
        self.export_filtered(&filter)
    }

    pub fn export_filtered(&self, filter: &ExportFilter) -> AppResult<Vec<RecordExport>> {
        let records = match &filter.unit {
            Some(u) => self.store.read_unit(u)?,
            None => self.store.read_all()?,
        };

        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .map(RecordExport::from)
            .collect())
    }

    /// Snapshot the full log to `backup_path` (CSV), then empty it.
    /// Admin only. Nothing is cleared if the snapshot cannot be written.
    pub fn reset_log(&mut self, caller: &Caller, backup_path: &Path) -> AppResult<ResetReport> {
        Self::authorize_reset(caller)?;

        let cleared = self.store.clear_with(|records| {
            let rows: Vec<RecordExport> = records.iter().map(RecordExport::from).collect();
            snapshot::write_snapshot(backup_path, &rows)
        })?;

        Ok(ResetReport {
            backup_path: backup_path.to_path_buf(),
            cleared,
        })
    }

    /// Only admins may reset the log.
    pub fn authorize_reset(caller: &Caller) -> AppResult<()> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "user '{}' may not reset the log",
                caller.username
            )))
        }
    }

    /// Read back a snapshot written by `reset_log`.
    pub fn read_backup(path: &Path) -> AppResult<Vec<RecordExport>> {
        snapshot::read_snapshot(path)
    }
}

fn running_reading(catalog: &UnitCatalog, code: &str, latest: Option<&Record>) -> f64 {
    match latest {
        Some(r) => r.ending_reading,
        None => catalog.initial_reading(code),
    }
}
