//! User Model

use serde::{Deserialize, Serialize};

/// User role — closed set, matched exhaustively instead of comparing
/// role strings at every call site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum Role {
    /// Sees and mutates all branches
    Admin,
    /// Sees and mutates only the assigned branch
    BranchStaff,
    /// Read-only
    Staff,
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Opaque argon2 PHC string, never serialized out
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Required in practice when role = BranchStaff
    pub branch_id: Option<i64>,
}

/// Registration payload — `password` is plaintext here and hashed before
/// it ever reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub branch_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serializes() {
        let user = User {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            password_hash: "$argon2id$...".into(),
            role: Role::Admin,
            branch_id: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "admin");
    }
}
