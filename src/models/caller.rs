use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Operator,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "operator" => Some(Role::Operator),
            _ => None,
        }
    }

    /// Helper: parse CLI input (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.trim().to_lowercase())
    }
}

/// Identity of whoever is invoking a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub role: Role,
}

impl Caller {
    pub const LOCAL_ADMIN: &'static str = "local";

    pub fn new(username: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            role,
        }
    }

    /// Identity used while no users are registered.
    pub fn local_admin() -> Self {
        Self::new(Self::LOCAL_ADMIN, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
