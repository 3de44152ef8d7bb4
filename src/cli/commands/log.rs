use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let ledger = open_ledger(cfg)?;
        LogLogic::print_log(ledger.store().conn())?;
    }

    Ok(())
}
