//! B2B corporate course sales and commission rule administration
//!
//! The commission rate is resolved against the rule table exactly once,
//! when the sale is recorded, and stored on the row. Editing rules later
//! changes future sales only.

use shared::models::{B2bcSale, B2bcSaleCreate, CommissionRule, CommissionRuleCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::Identity;
use crate::commission;
use crate::db::repository::{b2bc_sale as b2bc_repo, commission_rule as rule_repo};
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_NOTE_LEN,
};
use crate::utils::{AppError, AppResult};

use super::resolve_branch;

#[derive(Clone)]
pub struct B2bcService {
    pool: SqlitePool,
}

impl B2bcService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a B2B course sale with its commission snapshot.
    pub async fn create(&self, caller: &Identity, data: B2bcSaleCreate) -> AppResult<B2bcSale> {
        caller.require_sales_access()?;
        validate_required_text(&data.course_name, "course_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        if data.price < 0.0 {
            return Err(AppError::validation("price must not be negative"));
        }

        let branch_id = resolve_branch(caller, data.branch_id)?;

        let rules = rule_repo::find_all(&self.pool).await?;
        let (rate, amount) = commission::commission_for(&rules, data.price);

        let sale = B2bcSale {
            id: 0,
            sale_date: data.sale_date.unwrap_or_else(now_millis),
            course_name: data.course_name,
            price: data.price,
            commission_rate: rate,
            commission_amount: amount,
            user_id: Some(caller.user_id),
            branch_id,
            notes: data.notes,
        };
        let sale = b2bc_repo::insert(&self.pool, &sale).await?;
        tracing::info!(
            sale_id = sale.id,
            course = %sale.course_name,
            price = sale.price,
            commission_rate = sale.commission_rate,
            "B2B sale recorded"
        );
        Ok(sale)
    }

    pub async fn get(&self, caller: &Identity, id: i64) -> AppResult<B2bcSale> {
        let sale = b2bc_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("B2B sale {id} not found")))?;
        if let Some(scope) = caller.branch_scope()
            && sale.branch_id != Some(scope)
        {
            return Err(AppError::forbidden("sale belongs to another branch"));
        }
        Ok(sale)
    }

    pub async fn list(&self, caller: &Identity) -> AppResult<Vec<B2bcSale>> {
        Ok(b2bc_repo::list(&self.pool, caller.branch_scope()).await?)
    }

    pub async fn list_rules(&self) -> AppResult<Vec<CommissionRule>> {
        Ok(rule_repo::find_all(&self.pool).await?)
    }

    /// Add a commission rule. Admin-only; the range must be well-formed
    /// and must not overlap an existing rule.
    pub async fn create_rule(
        &self,
        caller: &Identity,
        data: CommissionRuleCreate,
    ) -> AppResult<CommissionRule> {
        caller.require_admin()?;
        if data.min_amount < 0.0 || data.max_amount < data.min_amount {
            return Err(AppError::validation(
                "rule range must satisfy 0 <= min_amount <= max_amount",
            ));
        }
        if !(0.0..=1.0).contains(&data.rate) {
            return Err(AppError::validation("rate must be between 0 and 1"));
        }
        let overlap = rule_repo::find_all(&self.pool)
            .await?
            .into_iter()
            .any(|r| data.min_amount <= r.max_amount && data.max_amount >= r.min_amount);
        if overlap {
            return Err(AppError::conflict(
                "rule range overlaps an existing commission rule",
            ));
        }
        Ok(rule_repo::create(&self.pool, data).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{branch as branch_repo, user as user_repo};
    use crate::db::DbService;
    use shared::models::{BranchCreate, Role};

    fn admin() -> Identity {
        Identity::new(1, Role::Admin, None)
    }

    async fn setup() -> (DbService, B2bcService) {
        let db = DbService::memory().await.unwrap();
        for name in ["North", "South"] {
            branch_repo::create(
                &db.pool,
                BranchCreate {
                    name: name.into(),
                    location: None,
                    capacity: None,
                },
            )
            .await
            .unwrap();
        }
        // Sales store the caller as user_id, which is a users FK.
        // Row ids: admin = 1, branch staff = 2 (branch 2).
        user_repo::create(&db.pool, "admin", "admin@x.com", "x", Role::Admin, None)
            .await
            .unwrap();
        user_repo::create(&db.pool, "south", "south@x.com", "x", Role::BranchStaff, Some(2))
            .await
            .unwrap();
        let svc = B2bcService::new(db.pool.clone());
        (db, svc)
    }

    fn sale_payload(price: f64) -> B2bcSaleCreate {
        B2bcSaleCreate {
            course_name: "Corporate Climbing Intro".into(),
            price,
            branch_id: Some(1),
            notes: None,
            sale_date: None,
        }
    }

    async fn seed_rules(svc: &B2bcService) {
        for (min, max, rate) in [
            (0.0, 10_000.0, 0.05),
            (10_000.01, 50_000.0, 0.08),
        ] {
            svc.create_rule(
                &admin(),
                CommissionRuleCreate {
                    min_amount: min,
                    max_amount: max,
                    rate,
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_commission_is_snapshotted_at_creation() {
        let (_db, svc) = setup().await;
        seed_rules(&svc).await;

        let sale = svc.create(&admin(), sale_payload(20_000.0)).await.unwrap();
        assert_eq!(sale.commission_rate, 0.08);
        assert_eq!(sale.commission_amount, 1_600.0);

        // A later rule for a disjoint range never touches the stored sale
        svc.create_rule(
            &admin(),
            CommissionRuleCreate {
                min_amount: 50_000.01,
                max_amount: 99_000.0,
                rate: 0.5,
            },
        )
        .await
        .unwrap();
        let reread = svc.get(&admin(), sale.id).await.unwrap();
        assert_eq!(reread.commission_rate, 0.08);
        assert_eq!(reread.commission_amount, 1_600.0);
    }

    #[tokio::test]
    async fn test_no_matching_rule_means_zero_commission() {
        let (_db, svc) = setup().await;
        let sale = svc.create(&admin(), sale_payload(5_000.0)).await.unwrap();
        assert_eq!(sale.commission_rate, 0.0);
        assert_eq!(sale.commission_amount, 0.0);
    }

    #[tokio::test]
    async fn test_overlapping_rule_is_rejected() {
        let (_db, svc) = setup().await;
        seed_rules(&svc).await;

        let err = svc
            .create_rule(
                &admin(),
                CommissionRuleCreate {
                    min_amount: 5_000.0,
                    max_amount: 15_000.0,
                    rate: 0.1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_rule_validation() {
        let (_db, svc) = setup().await;
        let err = svc
            .create_rule(
                &admin(),
                CommissionRuleCreate {
                    min_amount: 100.0,
                    max_amount: 50.0,
                    rate: 0.1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = svc
            .create_rule(
                &admin(),
                CommissionRuleCreate {
                    min_amount: 0.0,
                    max_amount: 10.0,
                    rate: 1.5,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_branch_staff_writes_into_own_branch() {
        let (_db, svc) = setup().await;
        let staff = Identity::new(2, Role::BranchStaff, Some(2));

        let mut payload = sale_payload(1_000.0);
        payload.branch_id = Some(9); // ignored for non-admin callers
        let sale = svc.create(&staff, payload).await.unwrap();
        assert_eq!(sale.branch_id, Some(2));
        assert_eq!(sale.user_id, Some(2));
    }
}
