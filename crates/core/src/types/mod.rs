//! Core types for Oakline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod origin;
pub mod price;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use id::DocumentId;
pub use origin::{CMS_ORIGIN_TAG, ORIGIN_METADATA_KEY, SyncOrigin};
pub use price::Price;
pub use slug::{Slug, SlugError};
pub use status::DocumentStatus;
