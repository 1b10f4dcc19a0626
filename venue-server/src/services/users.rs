//! User registration and credential verification
//!
//! Session/cookie handling lives outside the core; this service only
//! registers accounts and verifies credentials, handing back an
//! [`Identity`] for the caller to thread into every other operation.

use shared::models::{Role, User, UserCreate};
use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::Identity;
use crate::db::repository::user as user_repo;
use crate::utils::validation::{
    validate_required_text, MAX_EMAIL_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MIN_PASSWORD_LEN,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account. Admin-only, except for bootstrapping the
    /// very first admin on an empty user table.
    pub async fn register(&self, caller: Option<&Identity>, data: UserCreate) -> AppResult<User> {
        match caller {
            Some(caller) => caller.require_admin()?,
            None => {
                // Unauthenticated path is only for first-run bootstrap
                if user_repo::find_admin(&self.pool).await?.is_some() {
                    return Err(AppError::forbidden("admin role required"));
                }
                if data.role != Role::Admin {
                    return Err(AppError::validation(
                        "first registered account must be an admin",
                    ));
                }
            }
        }

        validate_required_text(&data.username, "username", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
        if !data.email.contains('@') {
            return Err(AppError::validation(format!(
                "email address looks invalid: {}",
                data.email
            )));
        }
        if data.password.len() < MIN_PASSWORD_LEN || data.password.len() > MAX_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters",
            )));
        }
        if data.role == Role::BranchStaff && data.branch_id.is_none() {
            return Err(AppError::validation(
                "branch_staff accounts require a branch assignment",
            ));
        }

        if user_repo::find_by_username_or_email(&self.pool, &data.username, &data.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "username or email already taken: {}",
                data.username
            )));
        }

        let hash = hash_password(&data.password)?;
        let user = user_repo::create(
            &self.pool,
            &data.username,
            &data.email,
            &hash,
            data.role,
            data.branch_id,
        )
        .await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and return the caller identity.
    ///
    /// A single error message for both unknown-user and wrong-password —
    /// no account enumeration through error text.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Identity> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::forbidden("invalid username or password"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::forbidden("invalid username or password"));
        }

        Ok(Identity::new(user.id, user.role, user.branch_id))
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        user_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn admin() -> Identity {
        Identity::new(1, Role::Admin, None)
    }

    fn payload(username: &str, email: &str, role: Role, branch_id: Option<i64>) -> UserCreate {
        UserCreate {
            username: username.into(),
            email: email.into(),
            password: "secret1".into(),
            role,
            branch_id,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_then_admin_only() {
        let db = DbService::memory().await.unwrap();
        let svc = UserService::new(db.pool.clone());

        // First account bootstraps without a caller, but must be admin
        let err = svc
            .register(None, payload("joe", "joe@x.com", Role::Staff, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        svc.register(None, payload("root", "root@x.com", Role::Admin, None))
            .await
            .unwrap();

        // Once an admin exists, the unauthenticated path is closed
        let err = svc
            .register(None, payload("eve", "eve@x.com", Role::Admin, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = DbService::memory().await.unwrap();
        let svc = UserService::new(db.pool.clone());
        svc.register(None, payload("root", "root@x.com", Role::Admin, None))
            .await
            .unwrap();

        let err = svc
            .register(Some(&admin()), payload("root", "other@x.com", Role::Staff, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_branch_staff_requires_branch() {
        let db = DbService::memory().await.unwrap();
        let svc = UserService::new(db.pool.clone());
        svc.register(None, payload("root", "root@x.com", Role::Admin, None))
            .await
            .unwrap();

        let err = svc
            .register(
                Some(&admin()),
                payload("bs", "bs@x.com", Role::BranchStaff, None),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_authenticate_roundtrip() {
        let db = DbService::memory().await.unwrap();
        let svc = UserService::new(db.pool.clone());
        svc.register(None, payload("root", "root@x.com", Role::Admin, None))
            .await
            .unwrap();

        let ident = svc.authenticate("root", "secret1").await.unwrap();
        assert!(ident.is_admin());

        let err = svc.authenticate("root", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        let err = svc.authenticate("nobody", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
