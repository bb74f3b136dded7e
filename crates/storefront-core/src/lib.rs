//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate holds the storefront's state and data-flow rules as plain
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (navbar, grid, cart modal)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ view snapshot / callbacks              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 View Controller (apps/storefront)               │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────┐  ┌────────────▼───────────────┐   │
//! │  │  ★ storefront-core (THIS) ★     │  │  storefront-client         │   │
//! │  │                                 │  │  (HTTP product store)      │   │
//! │  │  types · sort · cart · catalog  │  └────────────────────────────┘   │
//! │  │  NO I/O • NO NETWORK • NO CLOCK │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Rating, CategoryFilter, SortKey
//! - [`money`] - Cent-rounded display amounts
//! - [`sort`] - `derive_displayed`, the stable sort derivation
//! - [`cart`] - Cart with one entry per product id
//! - [`catalog`] - Catalog load state machine with stale-response guard
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{AddOutcome, Cart, Product};
//!
//! let product: Product = serde_json::from_str(
//!     r#"{"id": 7, "title": "Backpack", "price": 109.95, "category": "men's clothing"}"#,
//! ).unwrap();
//!
//! let mut cart = Cart::new();
//! assert_eq!(cart.add(product.clone()), AddOutcome::Added);
//! assert_eq!(cart.add(product), AddOutcome::AlreadyPresent);
//! assert_eq!(cart.total_money().to_string(), "$109.95");
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod sort;
pub mod types;

// These allow users to do `use storefront_core::Cart` instead of
// `use storefront_core::cart::Cart`

pub use cart::{AddOutcome, Cart};
pub use catalog::{ApplyOutcome, Catalog, CatalogPhase, RequestId};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use sort::derive_displayed;
pub use types::*;

/// Message shown when a catalog load fails.
///
/// Transport detail never reaches the user; it is logged instead.
pub const PRODUCT_FETCH_FAILED: &str = "Failed to fetch products";

/// Notice shown when a product is added to the cart twice.
pub const DUPLICATE_CART_ADD: &str = "Item already added to the cart";
