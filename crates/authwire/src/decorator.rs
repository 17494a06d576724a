//! Transport decorators: the wrapping contract and the built-in behaviors.
//!
//! A decorator takes ownership of the capability it wraps and returns a new
//! capability that intercepts the outgoing request before delegating. The
//! built-in decorators never short-circuit and never translate failures
//! raised by the capability they wrap.

use std::fmt;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Request, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::Transport;
use crate::error::Error;

/// A transformation that wraps one transport-performing capability in
/// another.
///
/// Applying a decorator consumes it and produces a new capability that
/// exclusively owns the wrapped one. The outer capability's `send` must
/// delegate to the inner one (directly or after modifying the request) and
/// return whatever it returns; inner failures propagate unchanged unless a
/// decorator is explicitly built to translate them.
pub trait Decorator: Send {
    /// Wrap `inner`, producing the decorated capability.
    fn wrap(self: Box<Self>, inner: Box<dyn Transport>) -> Box<dyn Transport>;
}

/// Adapt a plain closure into a [`Decorator`].
///
/// ```
/// use authwire::{Client, decorate_fn};
///
/// let client = Client::builder()
///     .with(decorate_fn(|inner| inner))
///     .build()?;
/// # Ok::<(), authwire::Error>(())
/// ```
pub fn decorate_fn<F>(f: F) -> DecorateFn<F>
where
    F: FnOnce(Box<dyn Transport>) -> Box<dyn Transport> + Send,
{
    DecorateFn { f }
}

/// A [`Decorator`] built from a closure; see [`decorate_fn`].
pub struct DecorateFn<F> {
    f: F,
}

impl<F> Decorator for DecorateFn<F>
where
    F: FnOnce(Box<dyn Transport>) -> Box<dyn Transport> + Send,
{
    fn wrap(self: Box<Self>, inner: Box<dyn Transport>) -> Box<dyn Transport> {
        (self.f)(inner)
    }
}

impl<F> fmt::Debug for DecorateFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecorateFn").finish_non_exhaustive()
    }
}

/// Attaches HTTP Basic-Auth credentials to every outgoing request.
///
/// The secret is held as a [`SecretString`] so it never shows up in debug
/// output, and the `Authorization` header it produces is marked sensitive.
/// Empty or otherwise malformed credentials are accepted as-is — the remote
/// peer's rejection comes back as an ordinary response, not a local error.
pub struct BasicAuth {
    username: String,
    secret: SecretString,
}

impl BasicAuth {
    /// Create a credential-injection decorator for `username` and `secret`.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: SecretString::from(secret.into()),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Decorator for BasicAuth {
    fn wrap(self: Box<Self>, inner: Box<dyn Transport>) -> Box<dyn Transport> {
        Box::new(BasicAuthTransport {
            inner,
            username: self.username,
            secret: self.secret,
        })
    }
}

struct BasicAuthTransport {
    inner: Box<dyn Transport>,
    username: String,
    secret: SecretString,
}

#[async_trait]
impl Transport for BasicAuthTransport {
    async fn send(&self, mut request: Request) -> Result<Response, Error> {
        let token = STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.secret.expose_secret()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);

        self.inner.send(request).await
    }
}

/// Sets a fixed header on every outgoing request.
///
/// The header is inserted with overwrite semantics: any value already on
/// the request — set by the caller or by a decorator that ran earlier in
/// the chain — is replaced, never duplicated.
#[derive(Debug, Clone)]
pub struct WithHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl WithHeader {
    /// Create a header-injection decorator for `name` and `value`.
    ///
    /// The parameters are already-validated header types, so construction
    /// cannot fail.
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }
}

impl Decorator for WithHeader {
    fn wrap(self: Box<Self>, inner: Box<dyn Transport>) -> Box<dyn Transport> {
        Box::new(HeaderTransport {
            inner,
            name: self.name,
            value: self.value,
        })
    }
}

struct HeaderTransport {
    inner: Box<dyn Transport>,
    name: HeaderName,
    value: HeaderValue,
}

#[async_trait]
impl Transport for HeaderTransport {
    async fn send(&self, mut request: Request) -> Result<Response, Error> {
        request
            .headers_mut()
            .insert(self.name.clone(), self.value.clone());

        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use reqwest::Method;
    use reqwest::header::HeaderMap;

    use super::*;

    /// Records the headers of every request it receives and answers 200.
    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<HeaderMap>>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: Request) -> Result<Response, Error> {
            self.seen.lock().unwrap().push(request.headers().clone());
            Ok(http::Response::new("ok").into())
        }
    }

    /// Fails every exchange with a fixed error.
    struct Refuser;

    #[async_trait]
    impl Transport for Refuser {
        async fn send(&self, _request: Request) -> Result<Response, Error> {
            Err(Error::Credential(
                HeaderValue::from_bytes(b"\n").unwrap_err(),
            ))
        }
    }

    fn probe_request() -> Request {
        Request::new(Method::GET, "http://localhost/probe".parse().unwrap())
    }

    #[tokio::test]
    async fn basic_auth_encodes_user_and_secret() {
        let recorder = Recorder::default();
        let transport = Box::new(BasicAuth::new("Benjamin", "Jones")).wrap(Box::new(recorder.clone()));

        transport.send(probe_request()).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        let auth = seen[0].get(AUTHORIZATION).unwrap().to_str().unwrap();
        let token = auth.strip_prefix("Basic ").unwrap();
        assert_eq!(STANDARD.decode(token).unwrap(), b"Benjamin:Jones");
    }

    #[tokio::test]
    async fn basic_auth_accepts_empty_credentials() {
        let recorder = Recorder::default();
        let transport = Box::new(BasicAuth::new("", "")).wrap(Box::new(recorder.clone()));

        transport.send(probe_request()).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        let auth = seen[0].get(AUTHORIZATION).unwrap().to_str().unwrap();
        let token = auth.strip_prefix("Basic ").unwrap();
        assert_eq!(STANDARD.decode(token).unwrap(), b":");
    }

    #[test]
    fn basic_auth_debug_redacts_secret() {
        let rendered = format!("{:?}", BasicAuth::new("benjamin", "hunter2"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }

    #[tokio::test]
    async fn with_header_inserts_exact_value() {
        let recorder = Recorder::default();
        let transport = Box::new(WithHeader::new(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("abc123"),
        ))
        .wrap(Box::new(recorder.clone()));

        transport.send(probe_request()).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].get("x-trace").unwrap(), "abc123");
    }

    #[tokio::test]
    async fn with_header_overwrites_instead_of_appending() {
        let recorder = Recorder::default();
        let transport = Box::new(WithHeader::new(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("replacement"),
        ))
        .wrap(Box::new(recorder.clone()));

        let mut request = probe_request();
        request.headers_mut().insert(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("original"),
        );
        transport.send(request).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].get_all("x-trace").iter().count(), 1);
        assert_eq!(seen[0].get("x-trace").unwrap(), "replacement");
    }

    #[tokio::test]
    async fn decorators_propagate_inner_failures_unchanged() {
        let transport = Box::new(BasicAuth::new("u", "s")).wrap(
            Box::new(WithHeader::new(
                HeaderName::from_static("x-trace"),
                HeaderValue::from_static("abc123"),
            ))
            .wrap(Box::new(Refuser)),
        );

        let result = transport.send(probe_request()).await;
        assert!(matches!(result, Err(Error::Credential(_))));
    }

    #[tokio::test]
    async fn closure_decorator_wraps_like_any_other() {
        let recorder = Recorder::default();
        let spec = decorate_fn(|inner| {
            Box::new(WithHeader::new(
                HeaderName::from_static("x-from-closure"),
                HeaderValue::from_static("yes"),
            ))
            .wrap(inner)
        });
        let transport = Box::new(spec).wrap(Box::new(recorder.clone()));

        transport.send(probe_request()).await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].get("x-from-closure").unwrap(), "yes");
    }
}
