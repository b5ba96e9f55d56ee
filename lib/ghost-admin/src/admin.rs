//! Ghost Admin API client.
//!
//! [`AdminClient`] pins every request to one validated base address, attaches
//! the standard headers and runs the execute/classify/decode cycle against an
//! injected [`HttpClient`].

use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::{Context, Destination, Error, HttpClient, Method, Request, Response, Result};

/// User agent sent by a freshly constructed [`AdminClient`].
pub const DEFAULT_USER_AGENT: &str = "ghost-admin-rs";

/// Client for a single Ghost Admin API host.
///
/// The executor is stored as-is: it is expected to already handle
/// authentication and TLS. Pass `&executor` or an `Arc` to keep ownership on
/// the caller's side.
///
/// # Example
///
/// ```ignore
/// use ghost_admin::{AdminClient, Context, HyperClient, Method};
///
/// let admin = AdminClient::new("https://demo.ghost.io", HyperClient::new())?;
/// let request = admin.new_empty_request(Method::Get, "ghost/api/admin/site/")?;
///
/// let mut site = serde_json::Value::Null;
/// let response = admin.send_json(Some(&Context::background()), request, &mut site).await?;
/// ```
#[derive(Clone)]
pub struct AdminClient<C> {
    client: C,
    base_url: Url,
    user_agent: String,
}

impl<C> fmt::Debug for AdminClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl<C> AdminClient<C> {
    /// Create a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not an `https` URL without a path.
    pub fn new(base_url: impl AsRef<str>, client: C) -> Result<Self> {
        let base_url = Self::parse_base_url(base_url.as_ref())?;
        Ok(Self {
            client,
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Validate a base address: parsable, `https`, no path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first rule that fails.
    pub fn parse_base_url(base_url: &str) -> Result<Url> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("failed to parse {base_url:?} as a url: {e}")))?;

        if url.scheme() != "https" {
            return Err(Error::config(format!(
                "base url must use the https scheme, got {:?}",
                url.scheme()
            )));
        }

        // An empty path on an https URL normalizes to "/".
        if url.path() != "/" {
            return Err(Error::config(format!(
                "base url must not contain a path, got {:?}",
                url.path()
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::config(format!(
                "base url must not contain a query or fragment, got {base_url:?}"
            )));
        }

        Ok(url)
    }

    /// Replace the user agent. An empty string suppresses the header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the user agent in place. An empty string suppresses the header.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// The user agent sent with each request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The base address every request path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Mutable access to the base address.
    ///
    /// Request building fails with [`Error::Config`] unless the path keeps a
    /// trailing `/`.
    #[must_use]
    pub fn base_url_mut(&mut self) -> &mut Url {
        &mut self.base_url
    }

    /// Get a reference to the executor.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the client and return the executor.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Build a request for `path` relative to the base address.
    ///
    /// `path` must not start with `/` and must stay under the base address.
    /// When `body` is given it is JSON encoded and `Content-Type:
    /// application/json` is set.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the base address path lost its trailing `/`
    /// - [`Error::InvalidArgument`] if `path` would escape the base address
    /// - [`Error::InvalidRequest`] if `path` cannot be resolved
    /// - [`Error::JsonSerialization`] if `body` cannot be encoded
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request<Bytes>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path)?;

        let mut builder = Request::builder(method, url);
        if let Some(body) = body {
            builder = builder.json(body)?;
        }
        if !self.user_agent.is_empty() {
            builder = builder.header(http::header::USER_AGENT.as_str(), self.user_agent.as_str());
        }

        let request = builder.build();
        trace!(method = %request.method(), url = %request.url(), "built request");
        Ok(request)
    }

    /// Build a request without a body. See [`AdminClient::new_request`].
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new_request`], minus serialization.
    pub fn new_empty_request(&self, method: Method, path: &str) -> Result<Request<Bytes>> {
        self.new_request::<()>(method, path, None)
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::config(format!(
                "base url must have a trailing slash, but {:?} does not",
                self.base_url.as_str()
            )));
        }

        if path.starts_with('/') {
            return Err(Error::invalid_argument(format!(
                "request path {path:?} must be relative (no leading '/')"
            )));
        }

        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::invalid_request(format!("cannot resolve {path:?}: {e}")))?;

        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(Error::invalid_argument(format!(
                "request path {path:?} resolves outside {}",
                self.base_url
            )));
        }

        Ok(url)
    }
}

impl<C: HttpClient> AdminClient<C> {
    /// Send `request` and deliver a `2xx` body to `destination`.
    ///
    /// The round trip is raced against `ctx`. Returns the response head
    /// (status and headers); the body is always released before returning.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `ctx` is `None`
    /// - [`Error::Cancelled`] / [`Error::DeadlineExceeded`] if `ctx` finishes
    ///   first, or is already done when the executor fails
    /// - any executor error otherwise
    /// - [`Error::Api`] for a status outside `200..300`
    /// - [`Error::JsonDeserialization`] / [`Error::Sink`] if the body cannot be delivered
    pub async fn execute<T>(
        &self,
        ctx: Option<&Context>,
        request: Request<Bytes>,
        destination: Destination<'_, T>,
    ) -> Result<Response<()>>
    where
        T: DeserializeOwned,
    {
        let ctx = ctx.ok_or_else(|| Error::invalid_argument("context must be provided"))?;

        let method = request.method();
        let url = request.url().clone();
        debug!(%method, %url, ?destination, "sending request");

        let result = tokio::select! {
            biased;
            result = self.client.execute(request) => result,
            err = ctx.done() => {
                debug!(%method, %url, error = %err, "request abandoned");
                return Err(err);
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(err) => return Err(ctx.err().unwrap_or(err)),
        };

        let (status, headers, body) = response.into_parts();
        let head = Response::new(status, headers, ());
        debug!(%method, %url, status, "received response");

        if !head.is_success() {
            return Err(Error::api(status));
        }

        destination.fill(&body)?;
        Ok(head)
    }

    /// Send `request` and discard the body.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::execute`].
    pub async fn send(&self, ctx: Option<&Context>, request: Request<Bytes>) -> Result<Response<()>> {
        self.execute(ctx, request, Destination::none()).await
    }

    /// Send `request` and decode the body into `value`.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::execute`].
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        ctx: Option<&Context>,
        request: Request<Bytes>,
        value: &mut T,
    ) -> Result<Response<()>> {
        self.execute(ctx, request, Destination::json(value)).await
    }

    /// Send `request` and copy the body into `sink`.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::execute`].
    pub async fn send_raw(
        &self,
        ctx: Option<&Context>,
        request: Request<Bytes>,
        sink: &mut (dyn std::io::Write + Send),
    ) -> Result<Response<()>> {
        self.execute(ctx, request, Destination::raw(sink)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminClient<()> {
        AdminClient::new("https://demo.ghost.io", ()).expect("valid base url")
    }

    #[test]
    fn parse_base_url_accepts_path_free_https() {
        for base in [
            "https://demo.ghost.io",
            "https://demo.ghost.io/",
            "https://demo.ghost.io:8443",
            "https://127.0.0.1",
        ] {
            let url = AdminClient::<()>::parse_base_url(base).expect(base);
            assert_eq!(url.path(), "/");
        }
    }

    #[test]
    fn parse_base_url_rejects_invalid_input() {
        for base in [
            "",
            "not a url",
            "demo.ghost.io",
            "http://demo.ghost.io",
            "ftp://demo.ghost.io",
            "https://demo.ghost.io/ghost",
            "https://demo.ghost.io/ghost/",
            "https://demo.ghost.io/?key=1",
            "https://demo.ghost.io/#admin",
        ] {
            let err = AdminClient::<()>::parse_base_url(base).expect_err(base);
            assert!(err.is_config(), "{base}: {err}");
        }
    }

    #[test]
    fn new_uses_default_user_agent() {
        let admin = admin();
        assert_eq!(admin.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(admin.base_url().as_str(), "https://demo.ghost.io/");
    }

    #[test]
    fn resolve_joins_relative_paths() {
        let admin = admin();
        for path in ["ghost/api/admin/posts/", "site/", "posts/?limit=all", ""] {
            let url = admin.resolve(path).expect(path);
            assert_eq!(url.as_str(), format!("https://demo.ghost.io/{path}"));
        }
    }

    #[test]
    fn resolve_rejects_escaping_paths() {
        let mut admin = admin();
        admin.base_url_mut().set_path("/ghost/api/admin/");

        for path in [
            "/posts/",
            "//evil.example/",
            "https://evil.example/posts/",
            "../../content/",
        ] {
            let err = admin.resolve(path).expect_err(path);
            assert!(err.is_invalid_argument(), "{path}: {err}");
        }
    }

    #[test]
    fn resolve_requires_trailing_slash_on_base() {
        let mut admin = admin();
        admin.base_url_mut().set_path("/ghost");

        for path in ["posts/", "/posts/", ""] {
            let err = admin.resolve(path).expect_err(path);
            assert!(err.is_config(), "{path}: {err}");
        }
    }

    #[test]
    fn new_request_sets_headers() {
        let admin = admin();

        let request = admin
            .new_request(Method::Post, "posts/", Some(&serde_json::json!({"title": "x"})))
            .expect("request");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("User-Agent"), Some(DEFAULT_USER_AGENT));

        let request = admin
            .new_empty_request(Method::Get, "posts/")
            .expect("request");
        assert_eq!(request.header("Content-Type"), None);
        assert!(request.body().is_none());
    }

    #[test]
    fn executor_is_stored_as_is() {
        let admin = AdminClient::new("https://demo.ghost.io", 7_u8).expect("valid base url");
        assert_eq!(*admin.inner(), 7);
        assert_eq!(admin.into_inner(), 7);
    }

    #[test]
    fn empty_user_agent_is_not_sent() {
        let admin = admin().with_user_agent("");
        let request = admin
            .new_empty_request(Method::Get, "site/")
            .expect("request");
        assert_eq!(request.header("User-Agent"), None);
    }
}
