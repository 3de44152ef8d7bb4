//! Users, roles and password checks.
//!
//! There is no session: every command resolves a `Caller` from the
//! credentials it was given and passes it down explicitly.

use crate::db::users::{self, UserRow};
use crate::errors::{AppError, AppResult};
use crate::models::caller::{Caller, Role};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rusqlite::Connection;

/// Hash a password with Argon2id and a random salt (PHC string).
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check credentials and return the matching caller.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> AppResult<Caller> {
    let username = username.trim();

    let user = users::find_user(conn, username)?
        .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::WrongPassword(username.to_string()));
    }

    Ok(Caller::new(&user.username, user.role))
}

/// Work out who is calling.
///
/// While no user is registered the caller is the implicit local admin, so
/// the first account can be created. After that credentials are mandatory.
pub fn resolve_caller(
    conn: &Connection,
    username: Option<&str>,
    password: Option<&str>,
) -> AppResult<Caller> {
    if users::count_users(conn)? == 0 {
        return Ok(Caller::local_admin());
    }

    match (username, password) {
        (Some(u), Some(p)) => authenticate(conn, u, p),
        _ => Err(AppError::AuthRequired),
    }
}

/// Create a user. Admin only.
pub fn register_user(
    conn: &Connection,
    caller: &Caller,
    username: &str,
    password: &str,
    role: Role,
) -> AppResult<i64> {
    if !caller.is_admin() {
        return Err(AppError::Forbidden(format!(
            "user '{}' may not register users",
            caller.username
        )));
    }

    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput("username must not be empty".into()));
    }
    if password.is_empty() {
        return Err(AppError::InvalidInput("password must not be empty".into()));
    }
    // the first account replaces the implicit local admin, so it must be an admin
    if role != Role::Admin && users::count_users(conn)? == 0 {
        return Err(AppError::InvalidInput(
            "the first registered user must have the admin role".into(),
        ));
    }
    if users::find_user(conn, username)?.is_some() {
        return Err(AppError::UserExists(username.to_string()));
    }

    let hash = hash_password(password)?;
    users::insert_user(conn, username, &hash, role)
}

/// Registered users (hashes stay in the database).
pub fn list_users(conn: &Connection) -> AppResult<Vec<(String, Role, String)>> {
    Ok(users::list_users(conn)?
        .into_iter()
        .map(|UserRow { username, role, created_at, .. }| (username, role, created_at))
        .collect())
}
