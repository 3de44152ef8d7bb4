use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::utils::path::absolutize;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let dest = absolutize(file);
        BackupLogic::backup(&cfg.database, &dest.to_string_lossy(), *compress, *force)?;
    }

    Ok(())
}
