use rationlog::core::auth;
use rationlog::db::initialize::init_db;
use rationlog::db::pool::DbPool;
use rationlog::errors::AppError;
use rationlog::models::caller::{Caller, Role};

fn fresh_db() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

#[test]
fn empty_user_table_means_local_admin() {
    let pool = fresh_db();
    let caller = auth::resolve_caller(&pool.conn, None, None).unwrap();
    assert_eq!(caller, Caller::local_admin());
    assert!(caller.is_admin());
}

#[test]
fn credentials_required_once_users_exist() {
    let pool = fresh_db();
    auth::register_user(&pool.conn, &Caller::local_admin(), "sari", "s3cret", Role::Admin)
        .unwrap();

    let err = auth::resolve_caller(&pool.conn, None, None).unwrap_err();
    assert!(matches!(err, AppError::AuthRequired));

    let caller = auth::resolve_caller(&pool.conn, Some("sari"), Some("s3cret")).unwrap();
    assert_eq!(caller, Caller::new("sari", Role::Admin));
}

#[test]
fn wrong_password_and_unknown_user_are_rejected() {
    let pool = fresh_db();
    auth::register_user(&pool.conn, &Caller::local_admin(), "sari", "s3cret", Role::Admin)
        .unwrap();

    assert!(matches!(
        auth::authenticate(&pool.conn, "sari", "nope"),
        Err(AppError::WrongPassword(_))
    ));
    assert!(matches!(
        auth::authenticate(&pool.conn, "ghost", "s3cret"),
        Err(AppError::UnknownUser(_))
    ));
}

#[test]
fn only_admins_register_users() {
    let pool = fresh_db();
    let operator = Caller::new("budi", Role::Operator);

    let err = auth::register_user(&pool.conn, &operator, "x", "y", Role::Operator).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(auth::list_users(&pool.conn).unwrap().is_empty());
}

#[test]
fn duplicate_and_empty_names_are_rejected() {
    let pool = fresh_db();
    let admin = Caller::local_admin();
    auth::register_user(&pool.conn, &admin, "sari", "pw", Role::Admin).unwrap();

    assert!(matches!(
        auth::register_user(&pool.conn, &admin, " sari ", "pw", Role::Operator),
        Err(AppError::UserExists(_))
    ));
    assert!(matches!(
        auth::register_user(&pool.conn, &admin, "   ", "pw", Role::Operator),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        auth::register_user(&pool.conn, &admin, "budi", "", Role::Operator),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn passwords_are_stored_hashed() {
    let hash = auth::hash_password("s3cret").unwrap();
    assert_ne!(hash, "s3cret");
    assert!(hash.starts_with("$argon2"));
    assert!(auth::verify_password("s3cret", &hash).unwrap());
    assert!(!auth::verify_password("other", &hash).unwrap());
}

#[test]
fn list_users_reports_roles() {
    let pool = fresh_db();
    let admin = Caller::local_admin();
    auth::register_user(&pool.conn, &admin, "sari", "pw", Role::Admin).unwrap();
    auth::register_user(&pool.conn, &admin, "budi", "pw", Role::Operator).unwrap();

    let users: Vec<(String, Role)> = auth::list_users(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|(name, role, _)| (name, role))
        .collect();

    assert_eq!(
        users,
        vec![
            ("budi".to_string(), Role::Operator),
            ("sari".to_string(), Role::Admin)
        ]
    );
}

#[test]
fn first_user_must_be_admin() {
    let pool = fresh_db();
    let local = auth::resolve_caller(&pool.conn, None, None).unwrap();

    let err = auth::register_user(&pool.conn, &local, "budi", "pw", Role::Operator).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(auth::list_users(&pool.conn).unwrap().is_empty());

    // the local admin is still in charge and can bootstrap a real admin
    let local = auth::resolve_caller(&pool.conn, None, None).unwrap();
    assert!(local.is_admin());
    auth::register_user(&pool.conn, &local, "sari", "pw", Role::Admin).unwrap();

    let sari = auth::resolve_caller(&pool.conn, Some("sari"), Some("pw")).unwrap();
    auth::register_user(&pool.conn, &sari, "budi", "pw", Role::Operator).unwrap();
    assert_eq!(auth::list_users(&pool.conn).unwrap().len(), 2);
}
