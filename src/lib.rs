//! rationlog library root.
//! Exposes the CLI parser, the high-level run() function and the ledger modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Add { .. } => commands::add::handle(cli, cfg),
        Commands::Reading { .. } => commands::reading::handle(&cli.command, cfg),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg),
        Commands::Units => commands::units::handle(cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Report { .. } => commands::report::handle(&cli.command, cfg),
        Commands::Reset { .. } => commands::reset::handle(cli, cfg),
        Commands::User { .. } => commands::user::handle(cli, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // a broken config file stops every command, init included
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
