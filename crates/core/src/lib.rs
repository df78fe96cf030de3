//! Core business logic for Finboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `aggregation` - Revenue, expense, receipt and expenditure calculators
//! - `period` - Calendar reporting periods relative to a given day
//! - `dashboard` - View models the dashboard pages render
//! - `access` - Company membership and group checks for gated pages
//! - `auth` - Password hashing

pub mod access;
pub mod aggregation;
pub mod auth;
pub mod dashboard;
pub mod period;
