//! # Catalog State Machine
//!
//! Holds the product list for the selected category, the sorted view of it,
//! and the loading/error flags, and decides which network completions are
//! allowed to change them.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────┐  begin_load()  ┌─────────┐  complete_load()  ┌────────┐      │
//! │  │ Idle │ ─────────────► │ Loading │ ────────────────► │ Loaded │      │
//! │  └──────┘                └────┬────┘                   └───┬────┘      │
//! │                               │  fail_load()               │           │
//! │                               ▼                            │           │
//! │                          ┌────────┐                        │           │
//! │                          │ Failed │                        │           │
//! │                          └───┬────┘                        │           │
//! │                              │     begin_load()            │           │
//! │                              └──────────► Loading ◄────────┘           │
//! │                                                                         │
//! │  set_sort_key() never changes the phase; it re-derives the displayed   │
//! │  list synchronously from the current products.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Responses
//! Every [`Catalog::begin_load`] hands out a fresh [`RequestId`]. Only a
//! completion carrying the latest id is applied; older ones come back as
//! [`ApplyOutcome::Stale`] and leave the state untouched. A quick
//! `electronics → jewelery` switch therefore always ends on jewelery,
//! whichever response lands last.
//!
//! ## Failure Keeps Stale Data
//! A failed load sets `error` but keeps the previous product lists, so the
//! error banner can be drawn over the last good catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::sort::derive_displayed;
use crate::types::{CategoryFilter, Product, SortKey};

/// Tag identifying one catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the catalog is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPhase {
    /// No load issued yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The latest load succeeded.
    Loaded,
    /// The latest load failed.
    Failed,
}

/// Whether a completion changed the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Completion belongs to a superseded request and was dropped.
    Stale,
}

/// Catalog state for the current category.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    all_products: Vec<Product>,
    displayed: Vec<Product>,
    selected: CategoryFilter,
    sort_key: SortKey,
    phase: CatalogPhase,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    latest_request: Option<RequestId>,
    issued: u64,
}

impl Catalog {
    /// Creates an idle catalog with `all` selected and default sort.
    pub fn new() -> Self {
        Catalog::default()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Enters `Loading` for `category` and returns the tag for the request.
    ///
    /// Clears `error`. Product lists are left as they are until the load
    /// completes.
    pub fn begin_load(&mut self, category: CategoryFilter) -> RequestId {
        self.issued += 1;
        let request = RequestId(self.issued);

        self.selected = category;
        self.phase = CatalogPhase::Loading;
        self.error = None;
        self.latest_request = Some(request);

        request
    }

    /// Applies a successful load.
    ///
    /// Replaces the product list wholesale and re-derives the displayed
    /// list with the current sort key.
    pub fn complete_load(
        &mut self,
        request: RequestId,
        products: Vec<Product>,
        loaded_at: DateTime<Utc>,
    ) -> ApplyOutcome {
        if !self.is_current(request) {
            return ApplyOutcome::Stale;
        }

        self.displayed = derive_displayed(&products, self.sort_key);
        self.all_products = products;
        self.phase = CatalogPhase::Loaded;
        self.error = None;
        self.loaded_at = Some(loaded_at);

        ApplyOutcome::Applied
    }

    /// Applies a failed load. Product lists keep their previous contents.
    pub fn fail_load(&mut self, request: RequestId, message: impl Into<String>) -> ApplyOutcome {
        if !self.is_current(request) {
            return ApplyOutcome::Stale;
        }

        self.phase = CatalogPhase::Failed;
        self.error = Some(message.into());

        ApplyOutcome::Applied
    }

    /// Changes the sort key and re-derives the displayed list.
    ///
    /// Does not touch `phase`, `loading` or `error`.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.displayed = derive_displayed(&self.all_products, key);
    }

    /// True if `request` is the latest load issued.
    pub fn is_current(&self, request: RequestId) -> bool {
        self.latest_request == Some(request)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Products for the selected category, in server order.
    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    /// Products after sorting.
    pub fn displayed_products(&self) -> &[Product] {
        &self.displayed
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn phase(&self) -> CatalogPhase {
        self.phase
    }

    /// True only while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == CatalogPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the current product list was loaded.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            category: "electronics".to_string(),
            image: String::new(),
            rating: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn electronics() -> CategoryFilter {
        CategoryFilter::Category("electronics".to_string())
    }

    #[test]
    fn test_new_catalog_is_idle() {
        let catalog = Catalog::new();
        assert_eq!(catalog.phase(), CatalogPhase::Idle);
        assert!(!catalog.is_loading());
        assert!(catalog.error().is_none());
        assert!(catalog.selected_category().is_all());
        assert_eq!(catalog.sort_key(), SortKey::Default);
    }

    #[test]
    fn test_begin_load_enters_loading_and_clears_error() {
        let mut catalog = Catalog::new();
        let first = catalog.begin_load(CategoryFilter::All);
        catalog.fail_load(first, "Failed to fetch products");
        assert!(catalog.error().is_some());

        catalog.begin_load(electronics());
        assert!(catalog.is_loading());
        assert!(catalog.error().is_none());
        assert_eq!(catalog.selected_category(), &electronics());
    }

    #[test]
    fn test_complete_load_applies_current_sort() {
        let mut catalog = Catalog::new();
        catalog.set_sort_key(SortKey::PriceLow);

        let request = catalog.begin_load(CategoryFilter::All);
        let outcome = catalog.complete_load(
            request,
            vec![product(1, "B", 10.0), product(2, "A", 5.0)],
            at(100),
        );

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(catalog.phase(), CatalogPhase::Loaded);
        assert!(!catalog.is_loading());
        assert!(catalog.error().is_none());
        assert_eq!(ids(catalog.all_products()), vec![1, 2]);
        assert_eq!(ids(catalog.displayed_products()), vec![2, 1]);
        assert_eq!(catalog.loaded_at(), Some(at(100)));
    }

    #[test]
    fn test_sort_key_change_does_not_reload() {
        let mut catalog = Catalog::new();
        let request = catalog.begin_load(CategoryFilter::All);
        catalog.complete_load(
            request,
            vec![product(1, "B", 10.0), product(2, "A", 5.0)],
            at(1),
        );

        catalog.set_sort_key(SortKey::NameAsc);
        assert_eq!(catalog.phase(), CatalogPhase::Loaded);
        assert_eq!(ids(catalog.displayed_products()), vec![2, 1]);

        catalog.set_sort_key(SortKey::Default);
        assert_eq!(ids(catalog.displayed_products()), vec![1, 2]);
        assert_eq!(ids(catalog.all_products()), vec![1, 2]);
    }

    #[test]
    fn test_failure_keeps_previous_products() {
        let mut catalog = Catalog::new();
        let first = catalog.begin_load(CategoryFilter::All);
        catalog.complete_load(first, vec![product(1, "A", 1.0)], at(1));

        let second = catalog.begin_load(electronics());
        let outcome = catalog.fail_load(second, "Failed to fetch products");

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(catalog.phase(), CatalogPhase::Failed);
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), Some("Failed to fetch products"));
        assert_eq!(ids(catalog.all_products()), vec![1]);
        assert_eq!(ids(catalog.displayed_products()), vec![1]);
        assert_eq!(catalog.loaded_at(), Some(at(1)));
    }

    #[test]
    fn test_stale_success_is_discarded() {
        let mut catalog = Catalog::new();
        let old = catalog.begin_load(electronics());
        let new = catalog.begin_load(CategoryFilter::Category("jewelery".to_string()));

        // Newer response lands first, older one afterwards.
        assert_eq!(
            catalog.complete_load(new, vec![product(5, "Ring", 9.0)], at(2)),
            ApplyOutcome::Applied
        );
        assert_eq!(
            catalog.complete_load(old, vec![product(9, "TV", 99.0)], at(3)),
            ApplyOutcome::Stale
        );

        assert_eq!(ids(catalog.all_products()), vec![5]);
        assert_eq!(catalog.loaded_at(), Some(at(2)));
        assert_eq!(
            catalog.selected_category(),
            &CategoryFilter::Category("jewelery".to_string())
        );
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut catalog = Catalog::new();
        let old = catalog.begin_load(electronics());
        let _new = catalog.begin_load(CategoryFilter::All);

        assert_eq!(catalog.fail_load(old, "boom"), ApplyOutcome::Stale);
        assert!(catalog.is_loading());
        assert!(catalog.error().is_none());

        assert_eq!(
            catalog.complete_load(old, vec![product(1, "A", 1.0)], at(1)),
            ApplyOutcome::Stale
        );
        assert!(catalog.is_loading());
        assert!(catalog.all_products().is_empty());
    }

    #[test]
    fn test_request_ids_increase() {
        let mut catalog = Catalog::new();
        let a = catalog.begin_load(CategoryFilter::All);
        let b = catalog.begin_load(CategoryFilter::All);
        assert!(b > a);
        assert!(catalog.is_current(b));
        assert!(!catalog.is_current(a));
    }
}
