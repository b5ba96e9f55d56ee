//! Outbound HTTP requests.
//!
//! A [`Request`] is built once, handed to an executor once and then dropped.
//!
//! # Example
//!
//! ```
//! use ghost_admin_core::{Method, Request};
//! use bytes::Bytes;
//!
//! let url = "https://demo.ghost.io/ghost/api/admin/posts/".parse().unwrap();
//! let request = Request::<Bytes>::builder(Method::Get, url)
//!     .header("Accept-Version", "v5.0")
//!     .build();
//! assert_eq!(request.header("Accept-Version"), Some("v5.0"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{APPLICATION_JSON, Method};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers, for executors that inject credentials.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Rebuild a request from its parts.
    #[must_use]
    pub const fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<B>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any previous value. Names are stored lowercase.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.headers.insert(name, value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body and the matching `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonSerialization`] if the value cannot be encoded.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header(http::header::CONTENT_TYPE.as_str(), APPLICATION_JSON)
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts_url() -> url::Url {
        url::Url::parse("https://demo.ghost.io/ghost/api/admin/posts/").expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::<Bytes>::builder(Method::Get, posts_url())
            .header("Accept-Version", "v5.0")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(
            request.url().as_str(),
            "https://demo.ghost.io/ghost/api/admin/posts/"
        );
        assert_eq!(request.header("Accept-Version"), Some("v5.0"));
        assert_eq!(request.header("accept-version"), Some("v5.0"));
        assert!(request.headers().contains_key("accept-version"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_json() {
        #[derive(serde::Serialize)]
        struct Post {
            title: String,
        }

        let request = Request::builder(Method::Post, posts_url())
            .json(&Post {
                title: "Hello".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(b"{\"title\":\"Hello\"}\n".as_slice())
        );
    }

    #[test]
    fn request_parts_round_trip() {
        let request = Request::builder(Method::Delete, posts_url())
            .header("X-Trace", "1")
            .body(Bytes::from_static(b"{}"))
            .build();

        let (method, url, mut headers, body) = request.into_parts();
        headers.insert("Authorization".to_string(), "Ghost token".to_string());
        let request = Request::from_parts(method, url, headers, body);

        assert_eq!(request.method(), Method::Delete);
        assert_eq!(request.header("Authorization"), Some("Ghost token"));
        assert_eq!(request.header("X-Trace"), Some("1"));
    }
}
