//! Venue administration core
//!
//! Multi-branch sales and booking administration: voucher/group activity
//! sales with bracket pricing, B2B course sales with commission tracking,
//! time-slot bookings, and the dashboard aggregation engine.
//!
//! This crate is the core consumed by a presentation layer; it returns
//! structured result sets and never renders anything itself. Every
//! operation receives an explicit [`auth::Identity`] for role/branch
//! scoping.

pub mod auth;
pub mod commission;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;
