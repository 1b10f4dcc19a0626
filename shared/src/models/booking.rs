//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// `Used` and `Canceled` are terminal; everything else may move to any
/// other status (no strict linear progression).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BookingStatus {
    NotBooked,
    Booked,
    Confirmed,
    Used,
    Canceled,
}

impl BookingStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Used | BookingStatus::Canceled)
    }
}

/// Scheduled time-slot fulfillment record, optionally tied to a sale.
///
/// `actual_quantity` is realized attendance — distinct from the planned
/// `quantity` on the linked sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    /// Nullable — bookings may exist standalone. Cascade-deleted with
    /// the parent sale.
    pub sale_id: Option<i64>,
    pub booking_name: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub booking_date: Option<String>,
    /// One of the fixed hourly slots (see `TIME_SLOTS`)
    pub time_slot: Option<String>,
    pub status: BookingStatus,
    pub actual_quantity: i64,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub sale_id: Option<i64>,
    pub booking_name: Option<String>,
    pub booking_date: Option<String>,
    pub time_slot: Option<String>,
    pub status: Option<BookingStatus>,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
}

/// Full update booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub booking_name: Option<String>,
    pub booking_date: Option<String>,
    pub time_slot: Option<String>,
    pub status: Option<BookingStatus>,
    pub actual_quantity: Option<i64>,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
}

/// Lightweight inline update — status and realized attendance only.
///
/// `actual_quantity` arrives as raw text from the list view and must
/// parse as a non-negative integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingFieldsUpdate {
    pub status: Option<BookingStatus>,
    pub actual_quantity: Option<String>,
}
