use crate::cli::commands::{open_ledger, record_filter};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        unit,
        range,
        shift,
        force,
    } = cmd
    {
        let filter = record_filter(unit.as_deref(), range.as_deref(), shift.as_deref())?;
        let ledger = open_ledger(cfg)?;
        ExportLogic::export(&ledger, format, file, &filter, *force)?;
    }
    Ok(())
}
