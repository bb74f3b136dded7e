//! # Cart
//!
//! Session-scoped shopping cart holding at most one entry per product id.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action          Method               Effect                       │
//! │  ───────────          ──────               ──────                       │
//! │                                                                         │
//! │  Add to Cart ───────► add(product) ──────► push  → AddOutcome::Added    │
//! │                                     └────► noop  → AlreadyPresent       │
//! │                                                                         │
//! │  Remove ────────────► remove(id) ────────► retain (noop if absent)      │
//! │                                                                         │
//! │  Render card ───────► contains(id)                                      │
//! │  Render modal ──────► items(), total(), total_money()                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two entries share a product id.
//! - Entries keep insertion order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

/// Result of [`Cart::add`].
///
/// A duplicate add is not an error: the caller decides how to tell the
/// user ("Item already added to the cart").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// Product appended to the end of the cart.
    Added,
    /// A product with the same id was already present; cart unchanged.
    AlreadyPresent,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product unless one with the same id is already present.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if self.contains(product.id) {
            return AddOutcome::AlreadyPresent;
        }
        self.items.push(product);
        AddOutcome::Added
    }

    /// Removes the entry with `id`. Returns `true` if one was removed.
    ///
    /// Removing an id that is not in the cart is a no-op.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != initial_len
    }

    /// Membership test by product id.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Sum of `price` over all entries; `0.0` when empty.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    /// [`Cart::total`] rounded to cents for display.
    pub fn total_money(&self) -> Money {
        Money::from_price(self.total())
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
