//! foodfacts-proxy entry point

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use foodfacts_proxy::{build_router, RelayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foodfacts-proxy")]
#[command(about = "CORS-workaround relay for the Open Food Facts API")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PROXY_BIND", default_value = "127.0.0.1:8787")]
    bind: SocketAddr,

    /// Upstream base URL forwarded requests are prefixed with
    #[arg(
        long,
        env = "PROXY_UPSTREAM",
        default_value = "https://world.openfoodfacts.org"
    )]
    upstream: String,

    /// Comma-separated list of origins allowed to call the relay
    #[arg(
        long,
        env = "PROXY_ALLOW_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,https://foodfacts.tools"
    )]
    allow_origins: Vec<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "PROXY_UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    upstream_timeout_secs: u64,

    /// Skip TLS verification on the outbound leg (dev upstreams only)
    #[arg(long, env = "PROXY_INSECURE_UPSTREAM_TLS")]
    insecure_upstream_tls: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = RelayConfig {
        upstream_base: cli.upstream,
        allow_origins: cli.allow_origins,
        insecure_upstream_tls: cli.insecure_upstream_tls,
        upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs),
    };

    let app = build_router(&config)?;

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(
        bind = %cli.bind,
        upstream = %config.upstream_base,
        origins = config.allow_origins.len(),
        "relay listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
