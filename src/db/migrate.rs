use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists. Applied migrations are recorded in it,
/// so it must exist before anything else runs.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240601_0001_create_records",
        description: "Created records table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS records (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            unit          TEXT NOT NULL,
            shift         TEXT NOT NULL DEFAULT '',
            shift_rank    INTEGER NOT NULL DEFAULT 3,
            hm_start      REAL NOT NULL,
            hm_end        REAL NOT NULL,
            delta         REAL NOT NULL,
            ration_rate   REAL NOT NULL,
            consumption   REAL NOT NULL,
            tank_capacity REAL NOT NULL,
            buffer_stock  REAL NOT NULL,
            is_latest     INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            CHECK (hm_end > hm_start)
        );
        "#,
    },
    Migration {
        version: "20240601_0002_create_users",
        description: "Created users table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL CHECK(role IN ('admin','operator')),
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20240715_0003_add_recorded_by",
        description: "Added recorded_by to records",
        sql: "ALTER TABLE records ADD COLUMN recorded_by TEXT NOT NULL DEFAULT '';",
    },
    Migration {
        version: "20240715_0004_records_order_index",
        description: "Indexed records by unit and log order",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_records_unit_order
            ON records(unit, date, shift_rank, id);
        CREATE INDEX IF NOT EXISTS idx_records_date
            ON records(date);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}

/// Versions already recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
