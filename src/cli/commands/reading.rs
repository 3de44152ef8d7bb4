use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::unit::UnitCatalog;
use crate::ui::messages::{info, warning};
use crate::utils::fmt_reading;

/// Step suggested for the next reading.
const SUGGESTED_STEP: f64 = 1.0;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reading { unit } = cmd {
        let ledger = open_ledger(cfg)?;
        let code = UnitCatalog::normalize(unit);

        if !ledger.catalog().is_allowed(&code) {
            warning(format!("Unit {} is not in the configured unit list.", code));
        }

        let running = ledger.get_running_reading(&code)?;

        info(format!("Unit {}", code));
        println!("  Current HM      : {}", fmt_reading(running));
        println!(
            "  Suggested next  : {}",
            fmt_reading(running + SUGGESTED_STEP)
        );
    }

    Ok(())
}
