use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rationlog
/// CLI ledger for unit refueling: hour-meter readings and fuel rations on SQLite
#[derive(Parser)]
#[command(
    name = "rationlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A fuel ration ledger CLI: log hour-meter readings and derive consumption and buffer stock using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Username to act as (required once users are registered)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(
        global = true,
        long = "password",
        env = "RATIONLOG_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Append a new hour-meter reading for a unit
    Add {
        /// Unit code (e.g. DZ3007)
        unit: String,

        /// Ending hour-meter reading
        #[arg(allow_negative_numbers = true)]
        ending: f64,

        /// Date of the reading (YYYY-MM-DD, default: today)
        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "shift", help = "Shift: 1 (06:00-18:00) or 2 (18:00-06:00)")]
        shift: Option<String>,
    },

    /// Show the running hour-meter reading of a unit
    Reading {
        /// Unit code
        unit: String,
    },

    /// List ledger records
    List {
        #[arg(long, help = "Only records of this unit")]
        unit: Option<String>,

        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (start:end)"
        )]
        range: Option<String>,

        #[arg(long, help = "Shift filter: 1, 2 or both")]
        shift: Option<String>,
    },

    /// List configured units
    Units,

    /// Export ledger records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only records of this unit")]
        unit: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Shift filter: 1, 2 or both")]
        shift: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Generate the refueling plan PDF for a date and shift
    Report {
        #[arg(long, help = "Report date (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long, default_value = "both", help = "Shift: 1, 2 or both")]
        shift: String,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Back up the whole log to CSV, then clear it (admin only)
    Reset {
        #[arg(long = "backup-file", value_name = "FILE")]
        backup_file: Option<String>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user (admin only)
    Add {
        name: String,

        #[arg(long = "new-password")]
        new_password: String,

        #[arg(long, default_value = "operator", help = "admin or operator")]
        role: String,
    },

    /// List registered users
    List,
}
