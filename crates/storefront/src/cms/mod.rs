//! The CMS document model and query API.
//!
//! Everything editors manage lives here: typed document payloads for each
//! collection ([`documents`]), the block schema registry and shared field
//! builders ([`blocks`]), and the store the rest of the code queries and
//! mutates ([`store`]).
//!
//! # Collections
//!
//! | Collection   | Payload              | Slugged | Draft/published |
//! |--------------|----------------------|---------|-----------------|
//! | `pages`      | [`documents::PageData`]     | yes | yes |
//! | `products`   | [`documents::ProductData`]  | yes | yes (tombstone) |
//! | `categories` | [`documents::CategoryData`] | yes | yes |
//! | `media`      | [`documents::MediaData`]    | no  | no  |
//! | `globals`    | [`documents::FooterData`]   | yes (`footer`) | no |
//! | `editors`    | [`documents::EditorData`]   | no  | no  |

pub mod blocks;
pub mod documents;
pub mod store;

/// Collection names used across the storefront.
pub mod collections {
    pub const PAGES: &str = "pages";
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const MEDIA: &str = "media";
    pub const GLOBALS: &str = "globals";
    pub const EDITORS: &str = "editors";
}
