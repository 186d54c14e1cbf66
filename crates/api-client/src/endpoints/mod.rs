//! Endpoint-specific API implementations
//!
//! Each module provides a typed facade over one group of upstream endpoints.
//!
//! | Module | Upstream endpoints |
//! |--------|-------------------|
//! | `products` | `category/{id}.json`, `cgi/search.pl`, `api/v0/product/{barcode}.json` |
//! | `categories` | `categories.json` |

pub mod categories;
pub mod products;

pub use categories::CategoriesApi;
pub use products::ProductsApi;
