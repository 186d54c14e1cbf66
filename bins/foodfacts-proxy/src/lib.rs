//! foodfacts-proxy: server-side relay for browser requests to Open Food Facts
//!
//! Browsers cannot call the upstream database directly because of
//! cross-origin restrictions, so this service re-issues their GET requests
//! from a server context: any path under the mount point is forwarded
//! verbatim to the upstream host and the status code and JSON body are
//! streamed back, with shared-cache directives on success. Failures never
//! escape as panics; every outcome is an HTTP response with a `{"message"}`
//! body.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, warn};

/// Cache directives attached to successful relayed responses
const CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600, max-age=3600";

/// Identifying User-Agent for the outbound leg, per upstream usage policy
const RELAY_USER_AGENT: &str = "foodfacts-proxy/0.3 (+https://github.com/foodfacts-tools)";

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Upstream base URL forwarded requests are prefixed with
    pub upstream_base: String,
    /// Origins allowed to call the relay from a browser
    pub allow_origins: Vec<String>,
    /// Skip TLS verification on the outbound leg (dev upstreams only)
    pub insecure_upstream_tls: bool,
    /// Timeout for the outbound leg
    pub upstream_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_base: "https://world.openfoodfacts.org".to_string(),
            allow_origins: vec![
                "http://localhost:5173".to_string(),
                "https://foodfacts.tools".to_string(),
            ],
            insecure_upstream_tls: false,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

struct RelayState {
    http: reqwest::Client,
    upstream_base: String,
}

/// Build the relay router
///
/// Preflight OPTIONS requests are answered by the CORS layer, which only
/// echoes `Access-Control-Allow-Origin` for allow-listed origins; requests
/// from other origins get a headerless 200 and are blocked browser-side.
pub fn build_router(config: &RelayConfig) -> anyhow::Result<Router> {
    let http = reqwest::Client::builder()
        .user_agent(RELAY_USER_AGENT)
        .timeout(config.upstream_timeout)
        .danger_accept_invalid_certs(config.insecure_upstream_tls)
        .build()?;

    let state = Arc::new(RelayState {
        http,
        upstream_base: config.upstream_base.trim_end_matches('/').to_string(),
    });

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", any(missing_target))
        .route("/{*path}", any(relay))
        .layer(cors)
        .with_state(state))
}

/// The mount point itself carries no upstream path to forward
async fn missing_target(method: Method) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::GET => message_response(
            StatusCode::BAD_REQUEST,
            "Target path is missing in proxy request",
        ),
        _ => method_not_allowed(),
    }
}

async fn relay(
    State(state): State<Arc<RelayState>>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    match method {
        Method::GET => forward(&state, &path, query.as_deref()).await,
        // non-preflight OPTIONS; preflights never reach the handler
        Method::OPTIONS => StatusCode::OK.into_response(),
        _ => method_not_allowed(),
    }
}

/// Re-issue the inbound request against the upstream and relay the answer
async fn forward(state: &RelayState, path: &str, query: Option<&str>) -> Response {
    let target = match query {
        Some(q) => format!("{}/{}?{}", state.upstream_base, path, q),
        None => format!("{}/{}", state.upstream_base, path),
    };

    let response = match state.http.get(&target).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(target = %target, error = %e, "upstream unreachable");
            return message_response(StatusCode::BAD_GATEWAY, &e.to_string());
        }
    };

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    if !status.is_success() {
        debug!(target = %target, status = %status, "relaying upstream error status");
        return message_response(status, &format!("upstream returned {status}"));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(target = %target, error = %e, "failed reading upstream body");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    debug!(target = %target, status = %status, bytes = body.len(), "relayed");

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .body(Body::from(body))
        .unwrap_or_else(|e| {
            message_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        })
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, OPTIONS")],
        Json(json!({"message": "Only GET is supported"})),
    )
        .into_response()
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
