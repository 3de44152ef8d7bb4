use crate::cli::commands::{caller_for, open_ledger};
use crate::cli::parser::{Cli, Commands, UserCommands};
use crate::config::Config;
use crate::core::auth;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::caller::Role;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    let ledger = open_ledger(cfg)?;
    let conn = ledger.store().conn();

    match action {
        UserCommands::Add {
            name,
            new_password,
            role,
        } => {
            let role = Role::from_code(role).ok_or_else(|| {
                AppError::InvalidInput(format!("role '{}'. Use admin or operator", role))
            })?;

            let caller = caller_for(&ledger, cli.user.as_deref(), cli.password.as_deref())?;
            let id = auth::register_user(conn, &caller, name, new_password, role)?;

            audit(
                conn,
                "user_add",
                name.trim(),
                &format!("#{} role {} by {}", id, role.to_db_str(), caller.username),
            );
            success(format!(
                "User '{}' registered as {}.",
                name.trim(),
                role.to_db_str()
            ));
        }
        UserCommands::List => {
            let users = auth::list_users(conn)?;
            if users.is_empty() {
                info("No users registered. Commands run as the local admin.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("User"),
                Column::left("Role"),
                Column::left("Created"),
            ]);
            for (name, role, created) in users {
                table.add_row(vec![name, role.to_db_str().to_string(), created]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
