//! Oakline Core - Shared types library.
//!
//! This crate provides common types used across all Oakline components:
//! - `storefront` - Public-facing content-managed e-commerce site
//! - `cli` - Command-line tools for migrations, seeding, and editor accounts
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Document IDs, prices in integer cents, slugs, document
//!   statuses, the sync-origin marker, and validated email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
