//! # Product Store Seam
//!
//! The three read operations the controller needs, as a trait.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────┐
//! │   View Controller    │ ─────► │  dyn ProductStore                │
//! └──────────────────────┘        │   ├── HttpProductStore (prod)    │
//!                                 │   └── in-memory stores (tests)   │
//!                                 └──────────────────────────────────┘
//! ```
//!
//! Implementations are stateless from the caller's point of view: no
//! caching, no retry, no de-duplication of concurrent calls.

use async_trait::async_trait;
use storefront_core::{Category, CategoryFilter, Product};

use crate::error::ClientResult;

/// Read-only access to the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Lists every category name.
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    /// Lists products, optionally restricted to one category.
    async fn list_products(&self, category: &CategoryFilter) -> ClientResult<Vec<Product>>;
}
