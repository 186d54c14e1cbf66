//! Main client implementation

use crate::config::{ClientConfig, Environment};
use crate::endpoints::{CategoriesApi, ProductsApi};
use crate::error::{ClientError, ClientResult};
use crate::transport::{DirectUrls, ProxiedUrls, UrlStrategy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Identifying User-Agent, as requested by the Open Food Facts usage policy
const CLIENT_USER_AGENT: &str = "foodfacts-client/0.3 (+https://github.com/foodfacts-tools)";

/// Open Food Facts client with built-in resilience
///
/// This client wraps `reqwest` and adds:
/// - An availability probe that fails fast when the transport path is down
/// - Automatic retry with exponential backoff for transient failures
/// - A fixed failure taxonomy ([`ClientError`]) for callers to match on
/// - Request correlation IDs for tracing
///
/// Each call is stateless: there is no cache, no shared counters, and no
/// cancellation token. Callers that lose interest simply drop the future.
#[derive(Clone)]
pub struct FoodFactsClient {
    inner: Client,
    config: Arc<ClientConfig>,
    strategy: Arc<dyn UrlStrategy>,
}

impl FoodFactsClient {
    /// Create a new client with configuration from environment variables
    pub fn new() -> ClientResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    ///
    /// The transport strategy follows the configured environment: the direct
    /// path in development, the relay path in production.
    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        let strategy: Arc<dyn UrlStrategy> = match config.environment {
            Environment::Development => Arc::new(DirectUrls::new(config.base_url.clone())),
            Environment::Production => Arc::new(ProxiedUrls::new(config.base_url.clone())),
        };
        Self::with_strategy(config, strategy)
    }

    /// Create a new client with an injected transport strategy
    pub fn with_strategy(
        config: ClientConfig,
        strategy: Arc<dyn UrlStrategy>,
    ) -> ClientResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::General(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            strategy,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access product lookup endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// Access the category listing endpoint
    #[must_use]
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Transport with probe and retry
    // -------------------------------------------------------------------------

    /// Perform a GET for an upstream path and deserialize the JSON body
    ///
    /// Probes the transport path first, then issues the real request.
    /// Transient failures are retried with the configured backoff; received
    /// HTTP error statuses are surfaced immediately.
    #[instrument(skip(self), fields(request_id))]
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.strategy.build_url(path);
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut attempts_remaining = self.config.retry.max_attempts();
        let mut retry = 0u32;

        loop {
            let start = Instant::now();
            let outcome = self.attempt(&request_id, &url).await;
            attempts_remaining -= 1;

            match outcome {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        url = %url,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_transient() && attempts_remaining > 0 => {
                    retry += 1;
                    let delay = self.config.retry.delay_for_retry(retry);
                    debug!(
                        request_id = %request_id,
                        url = %url,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        attempts_remaining,
                        "transient failure, retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    if e.is_transient() {
                        warn!(
                            request_id = %request_id,
                            url = %url,
                            attempts = self.config.retry.max_attempts(),
                            "retries exhausted"
                        );
                    } else {
                        debug!(
                            request_id = %request_id,
                            url = %url,
                            error = %e,
                            "request failed, not retrying"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }

    /// One try: probe the transport path, then issue the real request
    async fn attempt<T: DeserializeOwned>(&self, request_id: &str, url: &str) -> ClientResult<T> {
        self.probe().await?;

        let response = self
            .inner
            .get(url)
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;

        self.handle_response(url, response).await
    }

    /// Availability probe: a cheap GET to the transport base with a short
    /// timeout
    ///
    /// Any HTTP response counts as reachable; the probe only guards against
    /// the no-response class (DNS, connection refused, timeout). Its own
    /// error detail is dropped on the floor, the only visible effect of a
    /// failed probe is the call failing fast with `NetworkUnavailable`.
    async fn probe(&self) -> ClientResult<()> {
        let url = self.strategy.build_url("");

        match self
            .inner
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!(url = %url, error = %e, "availability probe failed");
                Err(ClientError::NetworkUnavailable(format!(
                    "availability probe failed for {url}"
                )))
            }
        }
    }

    /// Map an HTTP response onto the failure taxonomy and deserialize
    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());

        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(url.to_string()))
        } else if status.is_server_error() {
            Err(ClientError::UpstreamServer {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(ClientError::General(format!(
                "upstream returned {status}: {message}"
            )))
        }
    }
}

impl std::fmt::Debug for FoodFactsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodFactsClient")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
