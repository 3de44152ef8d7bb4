pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod reading;
pub mod report;
pub mod reset;
pub mod units;
pub mod user;

use crate::config::Config;
use crate::core::auth;
use crate::core::ledger::Ledger;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFilter;
use crate::export::range::parse_range;
use crate::models::caller::Caller;
use crate::models::shift::ShiftSelector;
use crate::models::unit::UnitCatalog;

/// Open the configured database, bring its schema up to date and wrap it
/// in a ledger with the configured unit tables.
pub(crate) fn open_ledger(cfg: &Config) -> AppResult<Ledger<SqliteStore>> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    Ok(Ledger::new(
        SqliteStore::new(pool),
        cfg.unit_catalog(),
        cfg.ledger_settings(),
    ))
}

/// Resolve the caller from the global `--user`/`--password` arguments.
pub(crate) fn caller_for(
    ledger: &Ledger<SqliteStore>,
    user: Option<&str>,
    password: Option<&str>,
) -> AppResult<Caller> {
    auth::resolve_caller(ledger.store().conn(), user, password)
}

/// Build a record filter from the `--unit`, `--range` and `--shift` arguments.
pub(crate) fn record_filter(
    unit: Option<&str>,
    range: Option<&str>,
    shift: Option<&str>,
) -> AppResult<ExportFilter> {
    let range = range.map(parse_range).transpose()?;

    let shift = match shift {
        Some(code) => Some(ShiftSelector::from_code(code).ok_or_else(|| {
            AppError::InvalidShift(format!("'{}'. Use 1, 2 or both", code))
        })?),
        None => None,
    };

    Ok(ExportFilter {
        unit: unit.map(UnitCatalog::normalize),
        range,
        shift,
    })
}
