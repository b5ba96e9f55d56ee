//! The executor capability.
//!
//! [`HttpClient`] performs one round trip: take a fully formed request, give
//! back a buffered response or a transport error. Implementations own TLS,
//! credential injection and connection reuse, and must be safe to call from
//! several tasks at once.
//!
//! Implement it directly for custom auth or test fakes.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Dropping the returned future must abort the round trip; the admin client
/// relies on that to honor cancellation.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use ghost_admin_core::{HttpClient, Request, Response, Result};
///
/// struct NoContent;
///
/// impl HttpClient for NoContent {
///     async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>> {
///         Ok(Response::new(204, HashMap::new(), Bytes::new()))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - A request that cannot be put on the wire
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
