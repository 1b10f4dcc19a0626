//! Booking lifecycle operations
//!
//! Bookings are fulfillment records: optionally tied to a sale, scheduled
//! into one of the fixed hourly slots, and walked through the status
//! lifecycle until they end up `Used` or `Canceled`. Terminal bookings
//! reject every further mutation.

use chrono::NaiveDate;
use shared::models::{Booking, BookingCreate, BookingFieldsUpdate, BookingStatus, BookingUpdate};
use sqlx::SqlitePool;

use crate::auth::Identity;
use crate::db::repository::{booking as booking_repo, sale as sale_repo};
use crate::utils::time::parse_date;
use crate::utils::validation::{validate_optional_text, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};

use super::resolve_branch;

/// Bookable hourly slots; no slot over the lunch hour.
pub const TIME_SLOTS: &[&str] = &[
    "08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

#[derive(Clone)]
pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate an optional (date, slot) pair against `today` and the
    /// slot table.
    fn validate_schedule(
        booking_date: &Option<String>,
        time_slot: &Option<String>,
        today: NaiveDate,
    ) -> AppResult<()> {
        if let Some(date) = booking_date {
            let parsed = parse_date(date)?;
            if parsed < today {
                return Err(AppError::validation(format!(
                    "booking date {date} is in the past"
                )));
            }
        }
        if let Some(slot) = time_slot
            && !TIME_SLOTS.contains(&slot.as_str())
        {
            return Err(AppError::validation(format!(
                "time slot {slot} is not bookable"
            )));
        }
        Ok(())
    }

    fn ensure_editable(caller: &Identity, booking: &Booking) -> AppResult<()> {
        if !caller.can_touch_branch(booking.branch_id) {
            return Err(AppError::forbidden("booking belongs to another branch"));
        }
        if booking.status.is_terminal() {
            return Err(AppError::business_rule(format!(
                "booking {} is already settled and cannot change",
                booking.id
            )));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &Identity,
        data: BookingCreate,
        today: NaiveDate,
    ) -> AppResult<Booking> {
        caller.require_sales_access()?;
        validate_optional_text(&data.booking_name, "booking_name", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        Self::validate_schedule(&data.booking_date, &data.time_slot, today)?;

        let branch_id = resolve_branch(caller, data.branch_id)?;

        if let Some(sale_id) = data.sale_id
            && sale_repo::find_by_id(&self.pool, sale_id).await?.is_none()
        {
            return Err(AppError::not_found(format!("Sale {sale_id} not found")));
        }

        let booking = Booking {
            id: 0,
            sale_id: data.sale_id,
            booking_name: data.booking_name,
            booking_date: data.booking_date,
            time_slot: data.time_slot,
            status: data.status.unwrap_or(BookingStatus::NotBooked),
            actual_quantity: 0,
            branch_id,
            notes: data.notes,
        };
        let booking = booking_repo::insert(&self.pool, &booking).await?;
        tracing::info!(booking_id = booking.id, "Booking created");
        Ok(booking)
    }

    pub async fn get(&self, caller: &Identity, id: i64) -> AppResult<Booking> {
        let booking = booking_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        if let Some(scope) = caller.branch_scope()
            && booking.branch_id != Some(scope)
        {
            return Err(AppError::forbidden("booking belongs to another branch"));
        }
        Ok(booking)
    }

    pub async fn list(&self, caller: &Identity) -> AppResult<Vec<Booking>> {
        Ok(booking_repo::list(&self.pool, caller.branch_scope()).await?)
    }

    /// Bookings from `today` onward, ordered by date then slot.
    pub async fn upcoming(&self, caller: &Identity, today: NaiveDate) -> AppResult<Vec<Booking>> {
        let date = today.format("%Y-%m-%d").to_string();
        Ok(booking_repo::upcoming(&self.pool, caller.branch_scope(), &date).await?)
    }

    /// Full edit. Fields left as `None` keep their current value.
    pub async fn update(
        &self,
        caller: &Identity,
        id: i64,
        data: BookingUpdate,
        today: NaiveDate,
    ) -> AppResult<Booking> {
        caller.require_sales_access()?;
        validate_optional_text(&data.booking_name, "booking_name", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        Self::validate_schedule(&data.booking_date, &data.time_slot, today)?;
        if let Some(qty) = data.actual_quantity
            && qty < 0
        {
            return Err(AppError::validation("actual_quantity must not be negative"));
        }

        let existing = booking_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        Self::ensure_editable(caller, &existing)?;

        let branch_id = match data.branch_id {
            Some(requested) => resolve_branch(caller, Some(requested))?,
            None => existing.branch_id,
        };
        let updated = Booking {
            id: existing.id,
            sale_id: existing.sale_id,
            booking_name: data.booking_name.or(existing.booking_name),
            booking_date: data.booking_date.or(existing.booking_date),
            time_slot: data.time_slot.or(existing.time_slot),
            status: data.status.unwrap_or(existing.status),
            actual_quantity: data.actual_quantity.unwrap_or(existing.actual_quantity),
            branch_id,
            notes: data.notes.or(existing.notes),
        };
        Ok(booking_repo::update(&self.pool, &updated).await?)
    }

    /// Inline list-view edit: status and realized attendance only.
    ///
    /// `actual_quantity` arrives as raw text and must parse as a
    /// non-negative integer; a bad value rejects the whole update and the
    /// record stays untouched.
    pub async fn update_fields(
        &self,
        caller: &Identity,
        id: i64,
        data: BookingFieldsUpdate,
    ) -> AppResult<Booking> {
        caller.require_sales_access()?;

        let actual_quantity = match &data.actual_quantity {
            Some(raw) => {
                let qty: i64 = raw.trim().parse().map_err(|_| {
                    AppError::validation(format!("actual_quantity is not a number: {raw}"))
                })?;
                if qty < 0 {
                    return Err(AppError::validation("actual_quantity must not be negative"));
                }
                Some(qty)
            }
            None => None,
        };

        let existing = booking_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        Self::ensure_editable(caller, &existing)?;

        Ok(booking_repo::update_fields(&self.pool, id, data.status, actual_quantity).await?)
    }

    pub async fn delete(&self, caller: &Identity, id: i64) -> AppResult<()> {
        caller.require_sales_access()?;
        let existing = booking_repo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        if !caller.can_touch_branch(existing.branch_id) {
            return Err(AppError::forbidden("booking belongs to another branch"));
        }
        booking_repo::delete(&self.pool, id).await?;
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::branch as branch_repo;
    use crate::db::DbService;
    use shared::models::{BranchCreate, Role};

    fn admin() -> Identity {
        Identity::new(1, Role::Admin, None)
    }

    async fn setup() -> (DbService, BookingService) {
        let db = DbService::memory().await.unwrap();
        branch_repo::create(
            &db.pool,
            BranchCreate {
                name: "Main".into(),
                location: None,
                capacity: None,
            },
        )
        .await
        .unwrap();
        let svc = BookingService::new(db.pool.clone());
        (db, svc)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn payload() -> BookingCreate {
        BookingCreate {
            sale_id: None,
            booking_name: Some("Walk-in".into()),
            booking_date: Some("2026-08-25".into()),
            time_slot: Some("10:00".into()),
            status: None,
            branch_id: Some(1),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_not_booked() {
        let (_db, svc) = setup().await;
        let booking = svc.create(&admin(), payload(), today()).await.unwrap();
        assert_eq!(booking.status, BookingStatus::NotBooked);
        assert_eq!(booking.actual_quantity, 0);
    }

    #[tokio::test]
    async fn test_past_date_is_rejected() {
        let (_db, svc) = setup().await;
        let mut data = payload();
        data.booking_date = Some("2026-08-23".into());
        let err = svc.create(&admin(), data, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_slot_is_rejected() {
        let (_db, svc) = setup().await;
        let mut data = payload();
        data.time_slot = Some("12:00".into());
        let err = svc.create(&admin(), data, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_sale_link_is_not_found() {
        let (_db, svc) = setup().await;
        let mut data = payload();
        data.sale_id = Some(404);
        let err = svc.create(&admin(), data, today()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_terminal_booking_rejects_updates() {
        let (_db, svc) = setup().await;
        let booking = svc.create(&admin(), payload(), today()).await.unwrap();
        svc.update_fields(
            &admin(),
            booking.id,
            BookingFieldsUpdate {
                status: Some(BookingStatus::Used),
                actual_quantity: Some("8".into()),
            },
        )
        .await
        .unwrap();

        let err = svc
            .update_fields(
                &admin(),
                booking.id,
                BookingFieldsUpdate {
                    status: Some(BookingStatus::Booked),
                    actual_quantity: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_bad_quantity_text_leaves_record_unchanged() {
        let (_db, svc) = setup().await;
        let booking = svc.create(&admin(), payload(), today()).await.unwrap();

        let err = svc
            .update_fields(
                &admin(),
                booking.id,
                BookingFieldsUpdate {
                    status: Some(BookingStatus::Confirmed),
                    actual_quantity: Some("lots".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let unchanged = svc.get(&admin(), booking.id).await.unwrap();
        assert_eq!(unchanged.status, BookingStatus::NotBooked);
        assert_eq!(unchanged.actual_quantity, 0);
    }

    #[tokio::test]
    async fn test_cross_branch_edit_is_forbidden() {
        let (_db, svc) = setup().await;
        let booking = svc.create(&admin(), payload(), today()).await.unwrap();

        let other = Identity::new(7, Role::BranchStaff, Some(2));
        let err = svc
            .update_fields(
                &other,
                booking.id,
                BookingFieldsUpdate {
                    status: Some(BookingStatus::Confirmed),
                    actual_quantity: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        let err = svc.delete(&other, booking.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_upcoming_orders_by_date_then_slot() {
        let (_db, svc) = setup().await;
        for (date, slot) in [
            ("2026-08-26", "09:00"),
            ("2026-08-25", "14:00"),
            ("2026-08-25", "08:00"),
        ] {
            let mut data = payload();
            data.booking_date = Some(date.into());
            data.time_slot = Some(slot.into());
            svc.create(&admin(), data, today()).await.unwrap();
        }

        let upcoming = svc.upcoming(&admin(), today()).await.unwrap();
        let order: Vec<_> = upcoming
            .iter()
            .map(|b| (b.booking_date.as_deref().unwrap(), b.time_slot.as_deref().unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2026-08-25", "08:00"),
                ("2026-08-25", "14:00"),
                ("2026-08-26", "09:00"),
            ]
        );
    }
}
