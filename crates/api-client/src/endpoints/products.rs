//! Product lookup endpoints
//!
//! Covers the three product-shaped upstream calls:
//! - Browse a category page: `category/{category}.json`
//! - Full-text search: `cgi/search.pl`
//! - Barcode lookup: `api/v0/product/{barcode}.json`

use crate::client::FoodFactsClient;
use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

/// Product lookup API interface
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: FoodFactsClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: FoodFactsClient) -> Self {
        Self { client }
    }

    /// Fetch one page of products in a category
    ///
    /// `selection` may carry several category ids, but only the first is
    /// used upstream. A longstanding limitation of the original system,
    /// kept as documented behavior rather than silently widened.
    ///
    /// GET `category/{category}.json?page={n}&page_size={m}`
    pub async fn by_category(
        &self,
        selection: impl Into<CategorySelection>,
        page: u32,
        page_size: u32,
    ) -> ClientResult<ProductPage> {
        let selection = selection.into();
        let category = selection
            .primary()
            .ok_or_else(|| ClientError::invalid_argument("category is required"))?;

        let path = format!(
            "category/{}.json?page={page}&page_size={page_size}",
            urlencoding::encode(category)
        );
        self.client.get_json(&path).await
    }

    /// Search products by name
    ///
    /// No minimum-length rule at this layer; callers pre-filter short terms.
    ///
    /// GET `cgi/search.pl?search_terms={term}&json=true&page={n}&page_size={m}`
    pub async fn search(&self, term: &str, page: u32, page_size: u32) -> ClientResult<ProductPage> {
        let path = format!(
            "cgi/search.pl?search_terms={}&json=true&page={page}&page_size={page_size}",
            urlencoding::encode(term)
        );
        self.client.get_json(&path).await
    }

    /// Look up a single product by barcode
    ///
    /// A `status` of 0 in the response means "no such product" and resolves
    /// successfully; it is not an error.
    ///
    /// GET `api/v0/product/{barcode}.json`
    pub async fn by_barcode(&self, barcode: &str) -> ClientResult<BarcodeLookup> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(ClientError::invalid_argument("barcode is required"));
        }

        let path = format!("api/v0/product/{}.json", urlencoding::encode(barcode));
        self.client.get_json(&path).await
    }
}

/// One or more category identifiers, ordered
///
/// The upstream call only accepts a single category, so a multi-id
/// selection uses its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// A single category id
    One(String),
    /// An ordered sequence of category ids; only the first is used
    Many(Vec<String>),
}

impl CategorySelection {
    /// The category id the upstream call will use, if any usable one exists
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        let first = match self {
            Self::One(id) => id.as_str(),
            Self::Many(ids) => ids.first().map(String::as_str).unwrap_or(""),
        };
        let first = first.trim();
        (!first.is_empty()).then_some(first)
    }
}

impl From<&str> for CategorySelection {
    fn from(id: &str) -> Self {
        Self::One(id.to_string())
    }
}

impl From<String> for CategorySelection {
    fn from(id: String) -> Self {
        Self::One(id)
    }
}

impl From<Vec<String>> for CategorySelection {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<Vec<&str>> for CategorySelection {
    fn from(ids: Vec<&str>) -> Self {
        Self::Many(ids.into_iter().map(str::to_string).collect())
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// An opaque upstream product record
///
/// The upstream schema is loose and versioned out of our control; the body
/// is carried verbatim and never validated or reshaped. The accessors only
/// peek at the handful of fields every caller wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(pub serde_json::Value);

impl Product {
    /// Product barcode, when present
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(|v| v.as_str())
    }

    /// Product display name, when present
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("product_name").and_then(|v| v.as_str())
    }
}

/// One page of products, passed through from the upstream verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page, upstream order preserved
    pub products: Vec<Product>,
    /// Total matching products across all pages
    pub count: u64,
    /// 1-based page number
    pub page: u32,
    /// Total number of pages
    pub page_count: u32,
}

impl ProductPage {
    /// Check the upstream pagination invariant: `page <= page_count`
    /// whenever the result set is non-empty
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.count == 0 || (self.page >= 1 && self.page <= self.page_count)
    }
}

/// Barcode lookup result
///
/// `status == 0` is a valid "product absent" outcome, distinct from any
/// failure; callers render it differently from a network error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeLookup {
    /// 1 if the product exists, 0 if not
    pub status: u8,
    /// Upstream's human-readable status
    #[serde(default)]
    pub status_verbose: Option<String>,
    /// The product record, present iff `status == 1`
    #[serde(default)]
    pub product: Option<Product>,
}

impl BarcodeLookup {
    /// Whether the barcode resolved to a product
    #[must_use]
    pub fn found(&self) -> bool {
        self.status == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_uses_first_of_many() {
        let selection = CategorySelection::from(vec!["dairy", "snacks"]);
        assert_eq!(selection.primary(), Some("dairy"));
    }

    #[test]
    fn test_selection_rejects_empty() {
        assert_eq!(CategorySelection::from("").primary(), None);
        assert_eq!(CategorySelection::from("   ").primary(), None);
        assert_eq!(CategorySelection::Many(vec![]).primary(), None);
        assert_eq!(CategorySelection::Many(vec![String::new()]).primary(), None);
    }

    #[test]
    fn test_barcode_lookup_not_found_is_success() {
        let json = r#"{"status": 0, "status_verbose": "product not found"}"#;
        let lookup: BarcodeLookup = serde_json::from_str(json).unwrap();
        assert!(!lookup.found());
        assert!(lookup.product.is_none());
    }

    #[test]
    fn test_product_is_passed_through_verbatim() {
        let json = r#"{
            "code": "3017620422003",
            "product_name": "Nutella",
            "brands": "Ferrero",
            "nutriments": {"energy-kcal_100g": 539},
            "unexpected_future_field": [1, 2, 3]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.code(), Some("3017620422003"));
        assert_eq!(product.name(), Some("Nutella"));
        // unknown fields survive the round trip untouched
        assert!(product.0.get("unexpected_future_field").is_some());
    }

    #[test]
    fn test_page_invariant() {
        let page: ProductPage = serde_json::from_str(
            r#"{"products": [{"code": "1"}], "count": 1000, "page": 1, "page_count": 42}"#,
        )
        .unwrap();
        assert!(page.is_consistent());

        let empty: ProductPage = serde_json::from_str(
            r#"{"products": [], "count": 0, "page": 1, "page_count": 0}"#,
        )
        .unwrap();
        assert!(empty.is_consistent());
    }
}
