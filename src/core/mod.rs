//! Core business logic - framework-agnostic storefront operations.
//!
//! Each module owns one domain concept and exposes async functions over a
//! `DatabaseConnection`. Derived values (cart totals, image URLs) are
//! recomputed from base rows on every call; nothing here caches.

pub mod customer;
pub mod media;
pub mod order;
pub mod product;
pub mod shipping;
