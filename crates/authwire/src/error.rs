//! Error types for client construction and request dispatch.

use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Errors surfaced by [`Client::send`](crate::Client::send) and by client
/// construction.
///
/// Decorators never translate or swallow failures: whatever the innermost
/// transport raises is what the caller of `send` sees. Nothing is retried,
/// logged, or recovered internally — retry policy belongs to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Network-level failure from the underlying transport.
    ///
    /// Connection refused, DNS failure, timeouts, and TLS errors all land
    /// here, unchanged by any decorators in between. Also raised when the
    /// transport itself cannot be assembled (TLS backend initialization).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A credential could not be encoded into a header value.
    ///
    /// Base64 output is always a valid header value, so this arm is not
    /// reachable through [`BasicAuth`](crate::BasicAuth); it exists so the
    /// encoding path stays typed instead of panicking.
    #[error("credential encoding error: {0}")]
    Credential(#[from] InvalidHeaderValue),
}

impl Error {
    /// Check if this error came from failing to establish a connection.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Check if this error was caused by a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
