//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so the error
//! handling stays consistent from the store up to `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Invalid hour-meter reading: {0}")]
    InvalidReading(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Ledger rules
    // ---------------------------
    #[error(
        "Ending reading ({ending:.2}) must be greater than the starting reading ({starting:.2})"
    )]
    ReadingNotIncreasing { ending: f64, starting: f64 },

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("No records found for {0}")]
    NoRecordsForReport(String),

    // ---------------------------
    // Auth
    // ---------------------------
    #[error("Authentication required: pass --user and --password")]
    AuthRequired,

    #[error("User not found: {0}")]
    UnknownUser(String),

    #[error("Wrong password for user {0}")]
    WrongPassword(String),

    #[error("Operation not permitted: {0}")]
    Forbidden(String),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
