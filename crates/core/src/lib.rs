//! Drippss Core - Shared domain library.
//!
//! This crate provides the domain model used across all Drippss components:
//! - `server` - Public storefront API and internal admin API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. Everything here is deterministic and testable
//! without infrastructure.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, order statuses, and roles
//! - [`cart`] - The shopping cart and its line-item merge rules
//! - [`pricing`] - Shipping cost policy, discounts, and currency formatting
//! - [`sizes`] - Per-size inventory ordering and selection rules
//! - [`checkout`] - Order assembly from cart lines and customer details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod sizes;
pub mod types;

pub use types::*;
