//! Caller identity and authorization scoping
//!
//! Session/cookie plumbing lives in the excluded web layer; the core only
//! ever sees an authenticated [`Identity`] threaded explicitly into every
//! operation. Role checks are exhaustive matches on the closed
//! [`Role`] enum — no string comparisons.

pub mod password;

use shared::models::Role;

use crate::utils::{AppError, AppResult};

/// Sentinel branch id for non-admin users without an assigned branch;
/// scoped queries match nothing for them.
const NO_BRANCH: i64 = -1;

/// Authenticated caller context
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
    pub branch_id: Option<i64>,
}

impl Identity {
    pub fn new(user_id: i64, role: Role, branch_id: Option<i64>) -> Self {
        Self {
            user_id,
            role,
            branch_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Branch filter for scoped queries: `None` = all branches (admin),
    /// `Some(id)` = that branch only.
    pub fn branch_scope(&self) -> Option<i64> {
        match self.role {
            Role::Admin => None,
            Role::BranchStaff | Role::Staff => Some(self.branch_id.unwrap_or(NO_BRANCH)),
        }
    }

    /// Whether the caller may mutate a record owned by `branch_id`.
    pub fn can_touch_branch(&self, branch_id: Option<i64>) -> bool {
        match self.role {
            Role::Admin => true,
            Role::BranchStaff | Role::Staff => branch_id == self.branch_id,
        }
    }

    /// Sales/booking mutations are open to admin and branch staff only;
    /// the plain staff role is read-only.
    pub fn require_sales_access(&self) -> AppResult<()> {
        match self.role {
            Role::Admin | Role::BranchStaff => Ok(()),
            Role::Staff => Err(AppError::forbidden(
                "staff role is not allowed to record or modify sales",
            )),
        }
    }

    /// Admin-only operations (user registration, catalog edits).
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("admin role required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_scope_is_unrestricted() {
        let id = Identity::new(1, Role::Admin, None);
        assert_eq!(id.branch_scope(), None);
        assert!(id.can_touch_branch(Some(42)));
    }

    #[test]
    fn test_branch_staff_scope_is_own_branch() {
        let id = Identity::new(2, Role::BranchStaff, Some(3));
        assert_eq!(id.branch_scope(), Some(3));
        assert!(id.can_touch_branch(Some(3)));
        assert!(!id.can_touch_branch(Some(4)));
        assert!(!id.can_touch_branch(None));
    }

    #[test]
    fn test_unassigned_staff_sees_nothing() {
        let id = Identity::new(3, Role::Staff, None);
        assert_eq!(id.branch_scope(), Some(NO_BRANCH));
        assert!(id.require_sales_access().is_err());
    }
}
