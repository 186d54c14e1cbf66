//! Transport path selection
//!
//! Two access paths exist to the upstream database and both must be
//! supported: a direct path that a front-end dev server rewrites to the
//! upstream host, and the production relay that re-issues requests from a
//! server context to sidestep browser cross-origin blocking. The choice is
//! fixed per deployment at construction time; the client itself only ever
//! asks a strategy to turn an upstream path into a full URL.

use std::fmt;

/// Builds the full request URL for an upstream path
///
/// One method, two implementations. Injected into the client so tests can
/// exercise both transports deterministically against a stub server.
pub trait UrlStrategy: Send + Sync + fmt::Debug {
    /// Turn an upstream path (e.g. `categories.json`) into a full URL
    fn build_url(&self, path: &str) -> String;
}

/// Direct access path
///
/// Points at a base whose prefix a development reverse proxy rewrites to
/// the upstream host (stripping the prefix). Also usable against the
/// upstream host itself in environments without cross-origin restrictions.
#[derive(Debug, Clone)]
pub struct DirectUrls {
    base: String,
}

impl DirectUrls {
    /// Create a direct strategy rooted at `base`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: normalize(base.into()),
        }
    }
}

impl UrlStrategy for DirectUrls {
    fn build_url(&self, path: &str) -> String {
        join(&self.base, path)
    }
}

/// Production relay path
///
/// Points at the mount point of the `foodfacts-proxy` relay, which forwards
/// the path verbatim to the upstream host.
#[derive(Debug, Clone)]
pub struct ProxiedUrls {
    base: String,
}

impl ProxiedUrls {
    /// Create a proxied strategy rooted at the relay mount point
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: normalize(base.into()),
        }
    }
}

impl UrlStrategy for ProxiedUrls {
    fn build_url(&self, path: &str) -> String {
        join(&self.base, path)
    }
}

fn normalize(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

fn join(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
