//! # View Model
//!
//! Serializable snapshot the presentational layer renders.
//!
//! ## Snapshot Layout
//! ```text
//! StorefrontView
//! ├── storeName
//! ├── categories[]        { value, label, selected }   "all" first
//! ├── sortOptions[]       { value, label, selected }
//! ├── products[]          ProductCardView (sorted)
//! ├── resultsLabel        "Showing 3 products"
//! ├── loading / error     grid hidden while either is set
//! ├── showGrid / showEmptyState
//! ├── cart                CartView (modal contents + badge count)
//! └── notice              transient "Item already added to the cart"
//! ```
//!
//! Every field is derived. The controller rebuilds the whole snapshot after
//! each processed message; nothing here is mutated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use storefront_core::{
    AddOutcome, Cart, Catalog, CatalogPhase, Category, Product, ProductId, SortKey,
    ALL_CATEGORIES, DUPLICATE_CART_ADD,
};

use crate::config::DisplaySettings;

/// Most stars a product card can show.
pub const MAX_STARS: u8 = 5;

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the presentational layer needs for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontView {
    pub store_name: String,
    pub categories: Vec<CategoryOption>,
    /// `"all"` or a category name.
    pub selected_category: String,
    pub sort_options: Vec<SortOption>,
    pub sort_key: SortKey,
    pub products: Vec<ProductCardView>,
    pub results_label: String,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: CatalogPhase,
    /// Product grid is rendered.
    pub show_grid: bool,
    /// "No products available" is rendered in place of the grid.
    pub show_empty_state: bool,
    #[ts(type = "string | null")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub cart: CartView,
    pub notice: Option<Notice>,
}

/// One entry of the category dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One entry of the sort dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    pub value: SortKey,
    pub label: String,
    pub selected: bool,
}

/// A product tile in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardView {
    #[ts(type = "number")]
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub image: String,
    pub price: f64,
    pub price_label: String,
    /// Whole stars to fill, `0..=5`.
    pub filled_stars: u8,
    #[ts(type = "number")]
    pub rating_count: u64,
    /// Add button is disabled while the product is in the cart.
    pub in_cart: bool,
    pub add_button_label: String,
}

/// Cart badge and modal contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Modal is open.
    pub visible: bool,
    pub items: Vec<CartLineView>,
    #[ts(type = "number")]
    pub count: usize,
    pub count_label: String,
    pub total: f64,
    pub total_label: String,
    /// Checkout button is rendered. It has no handler.
    pub show_checkout: bool,
}

/// One row of the cart modal.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[ts(type = "number")]
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub image: String,
    pub price_label: String,
}

/// Transient message, cleared by the next user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[ts(type = "number")]
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    DuplicateCartAdd,
}

impl Notice {
    /// Notice for an add that reported [`AddOutcome::AlreadyPresent`].
    pub fn duplicate_cart_add(product_id: ProductId) -> Self {
        Notice {
            kind: NoticeKind::DuplicateCartAdd,
            message: DUPLICATE_CART_ADD.to_string(),
            product_id,
        }
    }

    /// Notice to raise for `outcome`, if any.
    pub fn for_add_outcome(outcome: AddOutcome, product_id: ProductId) -> Option<Self> {
        match outcome {
            AddOutcome::Added => None,
            AddOutcome::AlreadyPresent => Some(Notice::duplicate_cart_add(product_id)),
        }
    }
}

// =============================================================================
// Building
// =============================================================================

/// Borrowed controller state a snapshot is built from.
pub struct ViewInputs<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub categories: &'a [Category],
    pub cart_visible: bool,
    pub notice: Option<&'a Notice>,
    pub display: &'a DisplaySettings,
}

impl StorefrontView {
    pub fn build(inputs: ViewInputs<'_>) -> Self {
        let ViewInputs {
            catalog,
            cart,
            categories,
            cart_visible,
            notice,
            display,
        } = inputs;

        let selected = catalog.selected_category().as_str();
        let loading = catalog.is_loading();
        let error = catalog.error().map(str::to_string);
        let show_grid = !loading && error.is_none();

        let products: Vec<ProductCardView> = catalog
            .displayed_products()
            .iter()
            .map(|p| ProductCardView::build(p, cart.contains(p.id), display))
            .collect();

        StorefrontView {
            store_name: display.store_name.clone(),
            categories: category_options(categories, selected),
            selected_category: selected.to_string(),
            sort_options: sort_options(catalog.sort_key()),
            sort_key: catalog.sort_key(),
            results_label: results_label(products.len()),
            show_empty_state: show_grid && products.is_empty(),
            products,
            loading,
            error,
            phase: catalog.phase(),
            show_grid,
            loaded_at: catalog.loaded_at(),
            cart: CartView::build(cart, cart_visible, display),
            notice: notice.cloned(),
        }
    }

    /// Card for `id` in the displayed list.
    pub fn product(&self, id: ProductId) -> Option<&ProductCardView> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Displayed product ids, in display order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }
}

impl ProductCardView {
    fn build(product: &Product, in_cart: bool, display: &DisplaySettings) -> Self {
        ProductCardView {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price,
            price_label: display.format_price(product.price),
            filled_stars: filled_stars(product.rating_rate()),
            rating_count: product.rating_count(),
            in_cart,
            add_button_label: if in_cart { "Added to Cart" } else { "Add to Cart" }.to_string(),
        }
    }
}

impl CartView {
    fn build(cart: &Cart, visible: bool, display: &DisplaySettings) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|p| CartLineView {
                id: p.id,
                title: p.title.clone(),
                category: p.category.clone(),
                image: p.image.clone(),
                price_label: display.format_price(p.price),
            })
            .collect();

        let total = cart.total();
        CartView {
            visible,
            items,
            count: cart.len(),
            count_label: item_count_label(cart.len()),
            total,
            total_label: display.format_price(total),
            show_checkout: !cart.is_empty(),
        }
    }
}

// =============================================================================
// Labels
// =============================================================================

/// `"all"` first, then the fetched categories in server order.
fn category_options(categories: &[Category], selected: &str) -> Vec<CategoryOption> {
    std::iter::once(ALL_CATEGORIES)
        .chain(categories.iter().map(String::as_str))
        .map(|value| CategoryOption {
            value: value.to_string(),
            label: category_label(value),
            selected: value == selected,
        })
        .collect()
}

fn sort_options(current: SortKey) -> Vec<SortOption> {
    SortKey::ALL
        .iter()
        .map(|&key| SortOption {
            value: key,
            label: key.label().to_string(),
            selected: key == current,
        })
        .collect()
}

/// Dropdown label: "All Categories", otherwise the first letter upper-cased.
pub fn category_label(category: &str) -> String {
    if category == ALL_CATEGORIES {
        return "All Categories".to_string();
    }

    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn results_label(count: usize) -> String {
    if count == 1 {
        "Showing 1 product".to_string()
    } else {
        format!("Showing {} products", count)
    }
}

pub fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

/// Whole stars for a rating; negative and `NaN` give none.
pub fn filled_stars(rate: f64) -> u8 {
    if rate.is_nan() {
        return 0;
    }
    rate.floor().clamp(0.0, MAX_STARS as f64) as u8
}
