//! Base transport provider with production pooling defaults.
//!
//! [`HttpTransport`] is the innermost, I/O-performing capability: a pooled
//! `reqwest::Client` assembled from a [`TransportConfig`]. Everything else
//! in this crate wraps it.

use std::num::NonZeroUsize;
use std::thread::available_parallelism;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Request, Response};

use crate::Transport;
use crate::error::Error;

/// Pooling and timeout defaults for the base transport.
///
/// A fresh value is produced on every [`TransportConfig::default`] call;
/// nothing is cached globally. The per-host idle cap is derived from
/// available parallelism at that moment and stored explicitly in the
/// struct so it stays observable and testable.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout for establishing a connection, TLS handshake included.
    pub connect_timeout: Duration,
    /// TCP keep-alive probe interval for pooled connections.
    pub tcp_keepalive: Duration,
    /// Idle connections older than this are closed.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections kept per destination host.
    ///
    /// Defaults to available parallelism + 1 so pooling scales with the
    /// host's concurrency capacity rather than a fixed constant.
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: available_parallelism().map_or(1, NonZeroUsize::get) + 1,
        }
    }
}

/// The one transport that performs actual I/O.
///
/// Ambient proxy configuration (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) is
/// respected through reqwest's system-proxy defaults. No connections are
/// opened at construction; the pool dials lazily on first use.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Assemble a pooled transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (TLS backend initialization).
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        debug!(
            "building base transport: connect_timeout={:?} pool_max_idle_per_host={}",
            config.connect_timeout, config.pool_max_idle_per_host
        );

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        Ok(self.client.execute(request).await?)
    }
}
