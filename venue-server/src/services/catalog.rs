//! Product catalog and branch administration
//!
//! Reads are open to every authenticated role; mutations are admin-only.
//! Sales snapshot product names at creation, so catalog edits never
//! rewrite history.

use shared::models::{Branch, BranchCreate, Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use crate::auth::Identity;
use crate::db::repository::{branch as branch_repo, product as product_repo};
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(product_repo::find_all(&self.pool).await?)
    }

    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        product_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    pub async fn create_product(
        &self,
        caller: &Identity,
        data: ProductCreate,
    ) -> AppResult<Product> {
        caller.require_admin()?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.category, "category", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        if data.default_price < 0.0 {
            return Err(AppError::validation("default_price must not be negative"));
        }
        let product = product_repo::create(&self.pool, data).await?;
        tracing::info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        caller: &Identity,
        id: i64,
        data: ProductUpdate,
    ) -> AppResult<Product> {
        caller.require_admin()?;
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(category) = &data.category {
            validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        if let Some(price) = data.default_price
            && price < 0.0
        {
            return Err(AppError::validation("default_price must not be negative"));
        }
        Ok(product_repo::update(&self.pool, id, data).await?)
    }

    pub async fn list_branches(&self) -> AppResult<Vec<Branch>> {
        Ok(branch_repo::find_all(&self.pool).await?)
    }

    pub async fn get_branch(&self, id: i64) -> AppResult<Branch> {
        branch_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Branch {id} not found")))
    }

    pub async fn create_branch(&self, caller: &Identity, data: BranchCreate) -> AppResult<Branch> {
        caller.require_admin()?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.location, "location", MAX_NAME_LEN)?;
        if let Some(capacity) = data.capacity
            && capacity < 0
        {
            return Err(AppError::validation("capacity must not be negative"));
        }
        let branch = branch_repo::create(&self.pool, data).await?;
        tracing::info!(branch_id = branch.id, name = %branch.name, "Branch created");
        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::Role;

    fn admin() -> Identity {
        Identity::new(1, Role::Admin, None)
    }

    #[tokio::test]
    async fn test_catalog_mutations_are_admin_only() {
        let db = DbService::memory().await.unwrap();
        let svc = CatalogService::new(db.pool.clone());
        let staff = Identity::new(2, Role::BranchStaff, Some(1));

        let data = ProductCreate {
            name: "1 Day Pass".into(),
            category: "voucher".into(),
            default_price: 550.0,
            description: None,
        };
        let err = svc.create_product(&staff, data.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let product = svc.create_product(&admin(), data).await.unwrap();
        assert_eq!(product.default_price, 550.0);
    }

    #[tokio::test]
    async fn test_product_partial_update() {
        let db = DbService::memory().await.unwrap();
        let svc = CatalogService::new(db.pool.clone());
        let product = svc
            .create_product(
                &admin(),
                ProductCreate {
                    name: "1 Day Pass".into(),
                    category: "voucher".into(),
                    default_price: 550.0,
                    description: None,
                },
            )
            .await
            .unwrap();

        let updated = svc
            .update_product(
                &admin(),
                product.id,
                ProductUpdate {
                    name: None,
                    category: None,
                    default_price: Some(600.0),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "1 Day Pass");
        assert_eq!(updated.default_price, 600.0);
    }

    #[tokio::test]
    async fn test_unknown_product_update_is_not_found() {
        let db = DbService::memory().await.unwrap();
        let svc = CatalogService::new(db.pool.clone());
        let err = svc
            .update_product(
                &admin(),
                99,
                ProductUpdate {
                    name: None,
                    category: None,
                    default_price: Some(1.0),
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_branch_capacity_validation() {
        let db = DbService::memory().await.unwrap();
        let svc = CatalogService::new(db.pool.clone());
        let err = svc
            .create_branch(
                &admin(),
                BranchCreate {
                    name: "North".into(),
                    location: None,
                    capacity: Some(-1),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let branch = svc
            .create_branch(
                &admin(),
                BranchCreate {
                    name: "North".into(),
                    location: None,
                    capacity: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(branch.capacity, 100);
    }
}
