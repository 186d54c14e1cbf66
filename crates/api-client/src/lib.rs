//! Resilient client for the Open Food Facts HTTP API
//!
//! This crate is the data-access layer of a food-product lookup system: it
//! translates category, search, and barcode queries into upstream HTTP
//! calls, selects the environment-appropriate transport path (a dev-server
//! rewrite rule in development, a CORS-workaround relay in production),
//! retries transient failures with exponential backoff, and maps every
//! failure into a small fixed taxonomy.
//!
//! # Features
//!
//! - **Availability probe**: a cheap short-timeout GET that makes calls fail
//!   fast with `NetworkUnavailable` when the transport path is down
//! - **Retry with exponential backoff**: transient failures only; received
//!   HTTP error statuses are definitive
//! - **Injected transport strategy**: the dev/prod base-path decision is an
//!   explicit constructor input, so tests exercise both paths
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use foodfacts_client::{ClientConfig, FoodFactsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FoodFactsClient::with_config(ClientConfig::from_env()?)?;
//!
//!     let page = client.products().by_category("dairy", 1, 24).await?;
//!     println!("{} of {} products", page.products.len(), page.count);
//!
//!     let lookup = client.products().by_barcode("3017620422003").await?;
//!     if !lookup.found() {
//!         println!("no such product");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod retry;
pub mod transport;

pub use client::FoodFactsClient;
pub use config::{ClientConfig, Environment};
pub use error::{ClientError, ClientResult};
pub use retry::RetryConfig;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FoodFactsClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::categories::{CategoryList, CategoryTag};
    pub use crate::endpoints::products::{
        BarcodeLookup, CategorySelection, Product, ProductPage,
    };
    pub use crate::endpoints::{CategoriesApi, ProductsApi};
    pub use crate::error::{ClientError, ClientResult};
    pub use crate::retry::RetryConfig;
    pub use crate::transport::{DirectUrls, ProxiedUrls, UrlStrategy};
}
