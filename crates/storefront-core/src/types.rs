//! # Domain Types
//!
//! Types shared by every layer of the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ CategoryFilter  │   │    SortKey      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  All            │   │  default        │       │
//! │  │  title          │   │  Category(name) │   │  price-low      │       │
//! │  │  price          │   └─────────────────┘   │  price-high     │       │
//! │  │  category       │                         │  name-asc       │       │
//! │  │  image          │   ┌─────────────────┐   │  name-desc      │       │
//! │  │  rating? ───────┼──►│     Rating      │   │  rating         │       │
//! │  └─────────────────┘   │  rate?  count?  │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## API Shape
//! Products are decoded straight from the catalog API. Everything the
//! storefront does not strictly need is optional on the wire, so a record
//! with no `rating`, a `rating` with no `count`, or no `description` still
//! decodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Product identifier, stable for the session.
pub type ProductId = u64;

/// Server-defined grouping string (e.g. `"electronics"`).
pub type Category = String;

/// Wire value of the "no filter" selection.
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Rating
// =============================================================================

/// Aggregate customer rating. Either field may be missing on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

// =============================================================================
// Product
// =============================================================================

/// A product as reported by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Price in dollars, exactly as the API reported it.
    pub price: f64,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Rating value, `0.0` when absent.
    pub fn rating_rate(&self) -> f64 {
        self.rating.and_then(|r| r.rate).unwrap_or(0.0)
    }

    /// Number of ratings, `0` when absent.
    pub fn rating_count(&self) -> u64 {
        self.rating.and_then(|r| r.count).unwrap_or(0)
    }

    /// Price rounded to cents for display.
    #[inline]
    pub fn price_money(&self) -> Money {
        Money::from_price(self.price)
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// The category selection driving catalog loads.
///
/// Serialized as a bare string: `"all"` or the category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// No filtering; the catalog is the full product list.
    #[default]
    All,
    /// Only products of one server-side category.
    Category(Category),
}

impl CategoryFilter {
    /// Returns the category name, or `None` for [`CategoryFilter::All`].
    pub fn category(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(name) => Some(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Wire value (`"all"` or the category name).
    pub fn as_str(&self) -> &str {
        self.category().unwrap_or(ALL_CATEGORIES)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "" => Err(CoreError::EmptyCategory),
            ALL_CATEGORIES => Ok(CategoryFilter::All),
            other => Ok(CategoryFilter::Category(other.to_string())),
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Category(name) => name,
        }
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// How the displayed product list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Server order.
    #[default]
    Default,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Title A to Z.
    NameAsc,
    /// Title Z to A.
    NameDesc,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// Every key, in the order the sort selector lists them.
    pub const ALL: [SortKey; 6] = [
        SortKey::Default,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::Rating,
    ];

    /// Wire value, e.g. `"price-low"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::Rating => "rating",
        }
    }

    /// Label shown in the sort selector.
    pub const fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "Default",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::NameAsc => "Name: A to Z",
            SortKey::NameDesc => "Name: Z to A",
            SortKey::Rating => "Highest Rated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSortKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_full_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.category, "men's clothing");
        assert!((product.rating_rate() - 3.9).abs() < f64::EPSILON);
        assert_eq!(product.rating_count(), 120);
        assert_eq!(product.price_money().cents(), 10995);
    }

    #[test]
    fn test_product_tolerates_missing_rating() {
        let json = r#"{"id": 2, "title": "Mug", "price": 5, "category": "home", "image": ""}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.rating.is_none());
        assert_eq!(product.rating_rate(), 0.0);
        assert_eq!(product.rating_count(), 0);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_product_tolerates_partial_rating() {
        let json = r#"{"id": 3, "title": "Ring", "price": 9.99, "category": "jewelery",
                       "image": "", "rating": {"count": 4}}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating_rate(), 0.0);
        assert_eq!(product.rating_count(), 4);
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "electronics".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Category("electronics".to_string())
        );
        assert_eq!(
            "".parse::<CategoryFilter>().unwrap_err(),
            CoreError::EmptyCategory
        );
    }

    #[test]
    fn test_category_filter_serializes_as_string() {
        let filter = CategoryFilter::Category("jewelery".to_string());
        assert_eq!(serde_json::to_string(&filter).unwrap(), "\"jewelery\"");
        assert_eq!(serde_json::to_string(&CategoryFilter::All).unwrap(), "\"all\"");

        let back: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert!(back.is_all());
    }

    #[test]
    fn test_sort_key_wire_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_default() {
        assert_eq!(SortKey::default(), SortKey::Default);
        assert_eq!(SortKey::Rating.label(), "Highest Rated");
    }
}
