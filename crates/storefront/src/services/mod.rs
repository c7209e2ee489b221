//! Business logic services for the storefront.
//!
//! - `auth` — editor credential verification (argon2)
//! - `catalog` — local product mutations with outbound provider push
//! - `payments` — provider API client and webhook signature verification
//! - `sync` — inbound webhook event application

pub mod auth;
pub mod catalog;
pub mod payments;
pub mod sync;
