//! Category listing endpoint

use crate::client::FoodFactsClient;
use crate::error::ClientResult;
use serde::{Deserialize, Serialize};

/// Categories API interface
#[derive(Debug, Clone)]
pub struct CategoriesApi {
    client: FoodFactsClient,
}

impl CategoriesApi {
    /// Create a new categories API interface
    pub(crate) fn new(client: FoodFactsClient) -> Self {
        Self { client }
    }

    /// Fetch the full category taxonomy
    ///
    /// GET `categories.json`
    pub async fn list(&self) -> ClientResult<CategoryList> {
        self.client.get_json("categories.json").await
    }
}

/// The upstream category taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    /// Number of tags, when the upstream includes it
    #[serde(default)]
    pub count: Option<u64>,
    /// Category tags, upstream order preserved
    pub tags: Vec<CategoryTag>,
}

/// One category tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTag {
    /// Tag identifier, e.g. `dairy`
    pub id: String,
    /// Localized display name, e.g. `en:dairy`
    pub name: String,
    /// Number of products carrying this tag
    pub products: u64,
}
