//! Row access for the `users` table.

use crate::errors::AppResult;
use crate::models::caller::Role;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

fn map_user(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    let role_str: String = row.get("role")?;
    // the CHECK constraint keeps unknown roles out; fall back to the least privilege
    let role = Role::from_db_str(&role_str).unwrap_or(Role::Operator);

    Ok(UserRow {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn find_user(conn: &Connection, username: &str) -> AppResult<Option<UserRow>> {
    Ok(conn
        .query_row(
            "SELECT id, username, password_hash, role, created_at
             FROM users WHERE username = ?1",
            [username],
            map_user,
        )
        .optional()?)
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: Role,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, password_hash, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            username,
            password_hash,
            role.to_db_str(),
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, role, created_at
         FROM users ORDER BY username ASC",
    )?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
