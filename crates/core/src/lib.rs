//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and user roles
//! - `ledger` - Income/expense transactions, balance summary and month grouping

pub mod auth;
pub mod ledger;
