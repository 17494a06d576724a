//! Client construction: decorator composition over the base transport.
//!
//! [`ClientBuilder`] accumulates an ordered sequence of decorator
//! specifications and folds them around the base transport in one shot;
//! the composed capability is installed into a [`Client`] and never
//! changes afterwards.

use std::fmt;
use std::sync::Arc;

use log::debug;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};

use crate::Transport;
use crate::decorator::{BasicAuth, Decorator, WithHeader};
use crate::error::Error;
use crate::transport::{HttpTransport, TransportConfig};

/// An HTTP client whose requests pass through a fixed decorator chain.
///
/// Built once via [`Client::builder`]; the composed chain is immutable
/// afterwards, and the client is cheap to clone and share across tasks.
/// Many `send` calls may be in flight at once — each call's request is
/// decorated independently.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Build a client over the default transport with no decorators.
    ///
    /// Functionally identical to sending through the base transport
    /// directly: no header or credential mutation occurs.
    ///
    /// # Errors
    ///
    /// Returns an error if the base transport cannot be assembled.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Start composing a client.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Issue a single request through the decorator chain.
    ///
    /// # Errors
    ///
    /// Surfaces whatever the innermost transport raised, unchanged by the
    /// decorators in between. A remote rejection (401 and friends) is an
    /// ordinary [`Response`], not an error — callers inspect the status
    /// themselves.
    pub async fn send(&self, request: Request) -> Result<Response, Error> {
        self.transport.send(request).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Ordered accumulation of decorator specifications plus the base
/// transport defaults.
///
/// Decorators apply in the order they are added: each request passes
/// through the first-added decorator first, and a later-added decorator
/// sees the request after every earlier one has acted on it — when two
/// decorators touch the same header, the later-added value is the one the
/// wire sees. Nothing is reordered, deduplicated, or validated; order is
/// the caller's responsibility.
#[must_use = "call build() to obtain a Client"]
pub struct ClientBuilder {
    config: TransportConfig,
    decorators: Vec<Box<dyn Decorator>>,
}

impl ClientBuilder {
    /// Create a builder with default transport configuration and no
    /// decorators.
    pub fn new() -> Self {
        Self {
            config: TransportConfig::default(),
            decorators: Vec::new(),
        }
    }

    /// Replace the base transport configuration.
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a decorator specification to the chain.
    pub fn with(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Append a credential-injection decorator.
    ///
    /// Shorthand for `with(BasicAuth::new(username, secret))`.
    pub fn basic_auth(self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.with(BasicAuth::new(username, secret))
    }

    /// Append a header-injection decorator.
    ///
    /// Shorthand for `with(WithHeader::new(name, value))`.
    pub fn header(self, name: HeaderName, value: HeaderValue) -> Self {
        self.with(WithHeader::new(name, value))
    }

    /// Compose the chain and produce the client.
    ///
    /// One-shot fold over the base transport; with zero decorators the
    /// client uses the base transport directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the base transport cannot be assembled. Options
    /// themselves cannot fail — malformed credentials are accepted as-is
    /// and rejected by the remote peer, not locally.
    pub fn build(self) -> Result<Client, Error> {
        debug!(
            "composing client with {} transport decorator(s)",
            self.decorators.len()
        );

        let mut transport: Box<dyn Transport> = Box::new(HttpTransport::new(&self.config)?);
        // Later-added decorators wrap closer to the wire, so each request
        // flows through the chain in the order the decorators were added.
        for decorator in self.decorators.into_iter().rev() {
            transport = decorator.wrap(transport);
        }

        Ok(Client {
            transport: Arc::from(transport),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("decorators", &self.decorators.len())
            .finish()
    }
}
