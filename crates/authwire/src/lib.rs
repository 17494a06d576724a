//! # authwire
//!
//! Composable transport decorators for building authenticated HTTP clients.
//!
//! This crate assembles ready-to-use [`Client`]s by wrapping a pooled
//! transport in an ordered chain of decorators. Each decorator intercepts
//! the outgoing request (credential injection, header injection) and then
//! delegates to the capability it wraps; responses travel back out through
//! the same chain. The crate implements no HTTP semantics of its own —
//! socket I/O, TLS, proxying, and connection pooling all belong to the
//! underlying transport.
//!
//! ## Example
//!
//! ```no_run
//! use authwire::Client;
//! use reqwest::header::{ACCEPT, HeaderValue};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Client::builder()
//!     .basic_auth("benjamin", "jones")
//!     .header(ACCEPT, HeaderValue::from_static("application/json"))
//!     .build()?;
//!
//! let request = reqwest::Request::new(
//!     reqwest::Method::GET,
//!     "https://httpbin.org/basic-auth/benjamin/jones".parse()?,
//! );
//! let response = client.send(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! Decorators apply in the order they are given to the builder. A request
//! passes through the first-added decorator first, so a later-added
//! decorator sees the request after every earlier one has acted on it and
//! its changes land closest to the wire — adding a header decorator after a
//! credential decorator lets it inspect or override the already-credentialed
//! request.

use async_trait::async_trait;
use reqwest::{Request, Response};

pub mod client;
pub mod decorator;
pub mod error;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use decorator::{BasicAuth, DecorateFn, Decorator, WithHeader, decorate_fn};
pub use error::Error;
pub use transport::{HttpTransport, TransportConfig};

/// A capability that takes one outbound request and produces a response.
///
/// Exactly one implementation performs real I/O ([`HttpTransport`]); every
/// other implementation is a decorator that exclusively owns one inner
/// `Transport` and delegates to it. Implementations must be safe to call
/// from many tasks at once and must not carry mutable state between calls —
/// the request handed to `send` is owned by that call alone.
#[must_use = "a transport does nothing until driven by send"]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single request/response exchange.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying exchange fails. Decorators
    /// propagate inner failures unchanged; a remote rejection such as a
    /// 401 is an ordinary [`Response`], not an error.
    async fn send(&self, request: Request) -> Result<Response, Error>;
}
