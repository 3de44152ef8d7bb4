use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::export::report::{default_report_file, write_report};
use crate::models::shift::ShiftSelector;
use crate::utils::date;
use crate::utils::path::absolutize;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        date: date_arg,
        shift,
        file,
        force,
    } = cmd
    {
        let d = date::parse_date_or_today(date_arg.as_deref())
            .ok_or_else(|| AppError::InvalidDate(date_arg.clone().unwrap_or_default()))?;

        let selector = ShiftSelector::from_code(shift).ok_or_else(|| {
            AppError::InvalidShift(format!("'{}'. Use 1, 2 or both", shift))
        })?;

        let path = match file {
            Some(f) => absolutize(f),
            None => default_report_file(d, selector),
        };

        let ledger = open_ledger(cfg)?;
        let snapshot = ledger.export(None)?;

        ensure_writable(&path, *force)?;
        write_report(&snapshot, d, selector, &path)?;
    }
    Ok(())
}
