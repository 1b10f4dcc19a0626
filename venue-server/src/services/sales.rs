//! Voucher / group sale operations
//!
//! A sale snapshots the product name and carries three derived money
//! fields kept in lockstep by the pricing engine. When the auto-booking
//! policy is on, sale creation also inserts a linked booking — both rows
//! in one transaction, so a crash can never leave a sale without its
//! booking.

use shared::models::{
    Booking, BookingStatus, SaleStatus, SaleType, VoucherGroupSale, VoucherGroupSaleCreate,
    VoucherGroupSaleUpdate, CATEGORY_ACTIVITIES_GROUP,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::Identity;
use crate::db::repository::{booking as booking_repo, product as product_repo, sale as sale_repo};
use crate::pricing;
use crate::utils::time::parse_month_window;
use crate::utils::validation::{validate_optional_text, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};

use super::resolve_branch;

#[derive(Clone)]
pub struct SaleService {
    pool: SqlitePool,
    /// Default auto-booking policy; per-call override wins
    auto_booking: bool,
}

impl SaleService {
    pub fn new(pool: SqlitePool, auto_booking: bool) -> Self {
        Self { pool, auto_booking }
    }

    /// Derive sale type and unit price from the product.
    ///
    /// Group activities go through the bracket tables first; a product
    /// without a site marker, and every voucher, falls back to the
    /// caller-supplied price or the catalog default.
    fn resolve_pricing(
        product_name: &str,
        category: &str,
        default_price: f64,
        quantity: i64,
        requested_price: Option<f64>,
    ) -> (SaleType, f64) {
        if category == CATEGORY_ACTIVITIES_GROUP {
            let unit = pricing::resolve_unit_price(product_name, quantity)
                .or(requested_price)
                .unwrap_or(default_price);
            (SaleType::Group, unit)
        } else {
            (SaleType::Voucher, requested_price.unwrap_or(default_price))
        }
    }

    /// Record a sale, optionally with its auto-created booking.
    ///
    /// `auto_booking = None` falls back to the configured default.
    pub async fn create(
        &self,
        caller: &Identity,
        data: VoucherGroupSaleCreate,
        auto_booking: Option<bool>,
    ) -> AppResult<(VoucherGroupSale, Option<Booking>)> {
        caller.require_sales_access()?;
        validate_optional_text(&data.partner_name, "partner_name", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.partner_company, "partner_company", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        validate_optional_text(&data.booking_name, "booking_name", MAX_SHORT_TEXT_LEN)?;

        let branch_id = resolve_branch(caller, data.branch_id)?;
        let product = product_repo::find_by_id(&self.pool, data.product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", data.product_id)))?;

        let (sale_type, price_per_unit) = Self::resolve_pricing(
            &product.name,
            &product.category,
            product.default_price,
            data.quantity,
            data.price_per_unit,
        );
        let totals = pricing::compute_totals(data.quantity, price_per_unit)?;

        let sale = VoucherGroupSale {
            id: 0,
            sale_date: data.sale_date.unwrap_or_else(now_millis),
            sale_type,
            product_name: product.name,
            quantity: data.quantity,
            price_per_unit,
            total_price: totals.total_price,
            vat_7: totals.vat_7,
            total_sale: totals.total_sale,
            partner_name: data.partner_name,
            partner_company: data.partner_company,
            status: data.status.unwrap_or(SaleStatus::Waiting),
            branch_id,
            salesperson_id: Some(caller.user_id),
            notes: data.notes,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let sale = sale_repo::insert(&mut *tx, &sale).await?;

        let booking = if auto_booking.unwrap_or(self.auto_booking) {
            let booking = Booking {
                id: 0,
                sale_id: Some(sale.id),
                booking_name: Some(
                    data.booking_name
                        .unwrap_or_else(|| format!("Booking for Sale {}", sale.id)),
                ),
                booking_date: None,
                time_slot: None,
                status: BookingStatus::Booked,
                actual_quantity: 0,
                branch_id,
                notes: None,
            };
            Some(booking_repo::insert(&mut *tx, &booking).await?)
        } else {
            None
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            sale_id = sale.id,
            product = %sale.product_name,
            quantity = sale.quantity,
            total_sale = sale.total_sale,
            auto_booked = booking.is_some(),
            "Sale recorded"
        );
        Ok((sale, booking))
    }

    pub async fn get(&self, caller: &Identity, id: i64) -> AppResult<VoucherGroupSale> {
        let sale = sale_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
        if !caller.is_admin()
            && let Some(scope) = caller.branch_scope()
            && sale.branch_id != Some(scope)
        {
            return Err(AppError::forbidden("sale belongs to another branch"));
        }
        Ok(sale)
    }

    /// List sales in scope. `month` is a `YYYY-MM` filter; a malformed
    /// value is ignored, matching the list-view contract.
    pub async fn list(
        &self,
        caller: &Identity,
        month: Option<&str>,
    ) -> AppResult<Vec<VoucherGroupSale>> {
        let window = month.and_then(parse_month_window);
        Ok(sale_repo::list(&self.pool, caller.branch_scope(), window).await?)
    }

    /// Rewrite a sale. Quantity/price changes re-run the pricing engine,
    /// and a `booking_name` propagates to the sale's first linked booking
    /// inside the same transaction.
    pub async fn update(
        &self,
        caller: &Identity,
        id: i64,
        data: VoucherGroupSaleUpdate,
    ) -> AppResult<VoucherGroupSale> {
        caller.require_sales_access()?;
        validate_optional_text(&data.partner_name, "partner_name", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.partner_company, "partner_company", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        validate_optional_text(&data.booking_name, "booking_name", MAX_SHORT_TEXT_LEN)?;

        let existing = sale_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
        if !caller.can_touch_branch(existing.branch_id) {
            return Err(AppError::forbidden("sale belongs to another branch"));
        }

        let product = product_repo::find_by_id(&self.pool, data.product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", data.product_id)))?;

        let (sale_type, price_per_unit) = Self::resolve_pricing(
            &product.name,
            &product.category,
            product.default_price,
            data.quantity,
            data.price_per_unit,
        );
        let totals = pricing::compute_totals(data.quantity, price_per_unit)?;

        let updated = VoucherGroupSale {
            sale_type,
            product_name: product.name,
            quantity: data.quantity,
            price_per_unit,
            total_price: totals.total_price,
            vat_7: totals.vat_7,
            total_sale: totals.total_sale,
            partner_name: data.partner_name,
            partner_company: data.partner_company,
            status: data.status,
            notes: data.notes,
            ..existing
        };

        // Resolve the linked booking before the transaction starts; the
        // pool may be down to a single connection.
        let linked = match &data.booking_name {
            Some(_) => booking_repo::find_by_sale(&self.pool, id)
                .await?
                .into_iter()
                .next(),
            None => None,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let sale = sale_repo::update(&mut *tx, &updated).await?;

        if let Some(name) = data.booking_name
            && let Some(linked) = linked
        {
            let renamed = Booking {
                booking_name: Some(name),
                ..linked
            };
            booking_repo::update(&mut *tx, &renamed).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(sale)
    }

    pub async fn update_status(
        &self,
        caller: &Identity,
        id: i64,
        status: SaleStatus,
    ) -> AppResult<VoucherGroupSale> {
        caller.require_sales_access()?;
        let existing = sale_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
        if !caller.can_touch_branch(existing.branch_id) {
            return Err(AppError::forbidden("sale belongs to another branch"));
        }
        Ok(sale_repo::update_status(&self.pool, id, status).await?)
    }

    /// Delete a sale; linked bookings go with it (storage-level cascade).
    pub async fn delete(&self, caller: &Identity, id: i64) -> AppResult<()> {
        caller.require_sales_access()?;
        let existing = sale_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
        if !caller.can_touch_branch(existing.branch_id) {
            return Err(AppError::forbidden("sale belongs to another branch"));
        }
        sale_repo::delete(&self.pool, id).await?;
        tracing::info!(sale_id = id, "Sale deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{branch as branch_repo, user as user_repo};
    use crate::db::DbService;
    use shared::models::{ProductCreate, Role};

    async fn setup() -> (DbService, SaleService, i64, i64) {
        let db = DbService::memory().await.unwrap();
        branch_repo::create(
            &db.pool,
            shared::models::BranchCreate {
                name: "Main".into(),
                location: None,
                capacity: None,
            },
        )
        .await
        .unwrap();
        // Sales store the caller as salesperson_id, which is a users FK
        user_repo::create(&db.pool, "admin", "admin@x.com", "x", Role::Admin, None)
            .await
            .unwrap();
        let group = product_repo::create(
            &db.pool,
            ProductCreate {
                name: "Activities Group (On-site)".into(),
                category: CATEGORY_ACTIVITIES_GROUP.into(),
                default_price: 900.0,
                description: None,
            },
        )
        .await
        .unwrap();
        let voucher = product_repo::create(
            &db.pool,
            ProductCreate {
                name: "1 Day Pass".into(),
                category: "voucher".into(),
                default_price: 550.0,
                description: None,
            },
        )
        .await
        .unwrap();
        let svc = SaleService::new(db.pool.clone(), true);
        (db, svc, group.id, voucher.id)
    }

    fn admin() -> Identity {
        Identity::new(1, Role::Admin, None)
    }

    fn create_payload(product_id: i64, quantity: i64) -> VoucherGroupSaleCreate {
        VoucherGroupSaleCreate {
            product_id,
            quantity,
            price_per_unit: None,
            partner_name: None,
            partner_company: None,
            status: None,
            branch_id: None,
            notes: None,
            sale_date: None,
            booking_name: None,
        }
    }

    #[tokio::test]
    async fn test_group_sale_uses_bracket_price() {
        let (_db, svc, group_id, _) = setup().await;
        let (sale, booking) = svc
            .create(&admin(), create_payload(group_id, 12), None)
            .await
            .unwrap();
        assert_eq!(sale.sale_type, SaleType::Group);
        assert_eq!(sale.salesperson_id, Some(1));
        assert_eq!(sale.price_per_unit, 850.0);
        assert_eq!(sale.total_price, 10_200.0);
        assert!((sale.total_sale - 10_914.0).abs() < 1e-9);
        let booking = booking.unwrap();
        assert_eq!(booking.sale_id, Some(sale.id));
        assert_eq!(booking.status, BookingStatus::Booked);
        assert_eq!(
            booking.booking_name.as_deref(),
            Some(format!("Booking for Sale {}", sale.id).as_str())
        );
    }

    #[tokio::test]
    async fn test_voucher_sale_uses_default_price() {
        let (_db, svc, _, voucher_id) = setup().await;
        let (sale, _) = svc
            .create(&admin(), create_payload(voucher_id, 4), Some(false))
            .await
            .unwrap();
        assert_eq!(sale.sale_type, SaleType::Voucher);
        assert_eq!(sale.price_per_unit, 550.0);
        assert_eq!(sale.status, SaleStatus::Waiting);
    }

    #[tokio::test]
    async fn test_auto_booking_off_creates_no_booking() {
        let (db, svc, _, voucher_id) = setup().await;
        let (sale, booking) = svc
            .create(&admin(), create_payload(voucher_id, 1), Some(false))
            .await
            .unwrap();
        assert!(booking.is_none());
        assert!(booking_repo::find_by_sale(&db.pool, sale.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_bookings() {
        let (db, svc, group_id, _) = setup().await;
        let (sale, booking) = svc
            .create(&admin(), create_payload(group_id, 10), None)
            .await
            .unwrap();
        assert!(booking.is_some());

        svc.delete(&admin(), sale.id).await.unwrap();
        assert!(booking_repo::find_by_sale(&db.pool, sale.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_cross_branch_delete_is_forbidden() {
        let (_db, svc, _, voucher_id) = setup().await;
        let mut payload = create_payload(voucher_id, 1);
        payload.branch_id = Some(1);
        let (sale, _) = svc.create(&admin(), payload, Some(false)).await.unwrap();

        let other = Identity::new(9, Role::BranchStaff, Some(2));
        let err = svc.delete(&other, sale.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_staff_role_cannot_record_sales() {
        let (_db, svc, _, voucher_id) = setup().await;
        let staff = Identity::new(5, Role::Staff, Some(1));
        let err = svc
            .create(&staff, create_payload(voucher_id, 1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_rejected() {
        let (_db, svc, _, voucher_id) = setup().await;
        let err = svc
            .create(&admin(), create_payload(voucher_id, 0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_recomputes_totals_and_renames_booking() {
        let (db, svc, group_id, _) = setup().await;
        let (sale, _) = svc
            .create(&admin(), create_payload(group_id, 10), None)
            .await
            .unwrap();

        let updated = svc
            .update(
                &admin(),
                sale.id,
                VoucherGroupSaleUpdate {
                    product_id: group_id,
                    quantity: 25,
                    price_per_unit: None,
                    partner_name: Some("ACME".into()),
                    partner_company: None,
                    status: SaleStatus::Paid,
                    notes: None,
                    booking_name: Some("ACME outing".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price_per_unit, 750.0);
        assert_eq!(updated.total_price, 18_750.0);
        assert_eq!(updated.status, SaleStatus::Paid);

        let bookings = booking_repo::find_by_sale(&db.pool, sale.id).await.unwrap();
        assert_eq!(bookings[0].booking_name.as_deref(), Some("ACME outing"));
    }

    #[tokio::test]
    async fn test_month_filter_bad_input_is_ignored() {
        let (_db, svc, _, voucher_id) = setup().await;
        svc.create(&admin(), create_payload(voucher_id, 1), Some(false))
            .await
            .unwrap();

        let all = svc.list(&admin(), Some("not-a-month")).await.unwrap();
        assert_eq!(all.len(), 1);
        // A valid month far in the past filters everything out
        let none = svc.list(&admin(), Some("2001-01")).await.unwrap();
        assert!(none.is_empty());
    }
}
