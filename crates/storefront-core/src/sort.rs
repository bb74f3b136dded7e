//! # Sort Derivation
//!
//! Computes the displayed product list from the catalog and the active
//! [`SortKey`].
//!
//! ```text
//! allProducts ──┐
//!               ├──► derive_displayed() ──► displayedProducts
//! sortKey ──────┘
//! ```
//!
//! ## Guarantees
//! - The input slice is never touched; the result is a fresh `Vec`.
//! - Stable: products that compare equal keep their catalog order.
//! - Numeric keys use `f64::total_cmp`, so a `NaN` price can never make
//!   the sort panic.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Product, SortKey};

/// Returns `products` ordered by `key`.
///
/// ## Example
/// ```rust
/// use storefront_core::sort::derive_displayed;
/// use storefront_core::{Product, SortKey};
///
/// let products: Vec<Product> = serde_json::from_str(r#"[
///     {"id": 1, "title": "B", "price": 10, "category": "c"},
///     {"id": 2, "title": "A", "price": 5, "category": "c"}
/// ]"#).unwrap();
///
/// let displayed = derive_displayed(&products, SortKey::PriceLow);
/// assert_eq!(displayed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub fn derive_displayed(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();

    // slice::sort_by is stable
    match key {
        SortKey::Default => {}
        SortKey::PriceLow => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::NameDesc => sorted.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortKey::Rating => sorted.sort_by(|a, b| b.rating_rate().total_cmp(&a.rating_rate())),
    }

    sorted
}

/// Human-oriented title comparison, in the order a shopper expects.
///
/// ```text
/// 1. letters     "Éclair" ~ "eclair" ~ "ECLAIR"   (accents and case ignored)
/// 2. accents     "eclair" < "éclair"
/// 3. case        "apple"  < "Apple"               (lowercase first)
/// 4. code points  last resort, keeps the order total
/// ```
fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| decomposed_lower(a).cmp(decomposed_lower(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

/// Compatibility-decomposed, lowercased, with combining marks stripped.
fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn decomposed_lower(title: &str) -> impl Iterator<Item = char> + '_ {
    title.nfkd().flat_map(char::to_lowercase)
}

fn case_pattern(title: &str) -> impl Iterator<Item = bool> + '_ {
    title.nfkd().map(char::is_uppercase)
}
