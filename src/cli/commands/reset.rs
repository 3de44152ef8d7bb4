use crate::cli::commands::{caller_for, open_ledger};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::log::audit;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::path::absolutize;
use chrono::Local;
use std::path::PathBuf;

/// Snapshot the whole log to CSV, then clear it.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { backup_file, yes } = &cli.command {
        let mut ledger = open_ledger(cfg)?;
        let caller = caller_for(&ledger, cli.user.as_deref(), cli.password.as_deref())?;
        Ledger::<SqliteStore>::authorize_reset(&caller)?;

        let backup_path = match backup_file {
            Some(f) => absolutize(f),
            None => default_backup_path(cfg),
        };

        if !*yes
            && !confirm(&format!(
                "This will clear ALL records after saving them to {}.",
                backup_path.display()
            ))
        {
            info("Reset cancelled.");
            return Ok(());
        }

        let report = ledger.reset_log(&caller, &backup_path)?;

        audit(
            ledger.store().conn(),
            "reset",
            &report.backup_path.to_string_lossy(),
            &format!("{} record(s) cleared by {}", report.cleared, caller.username),
        );

        success(format!("Backup written: {}", report.backup_path.display()));
        success(format!("Log cleared: {} record(s) removed.", report.cleared));
    }

    Ok(())
}

/// `<backup dir>/backup_<YYYYmmdd_HHMMSS>_records.csv`
fn default_backup_path(cfg: &Config) -> PathBuf {
    cfg.backup_dir().join(format!(
        "backup_{}_records.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
