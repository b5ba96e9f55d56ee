//! Request/response logging using `tracing`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result};

/// Headers whose values never reach the logs.
const REDACTED_HEADERS: &[&str] = &["authorization", "cookie"];

/// Layer that logs each round trip.
///
/// # Example
///
/// ```ignore
/// use ghost_admin::{HyperClient, middleware::LoggingLayer};
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// How much the logging layer records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also record request headers (credentials redacted) and body sizes.
    Debug,
    /// Method, URL, status and elapsed time only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Summary logging at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detailed logging at debug level.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

fn redacted_headers(request: &Request<Bytes>) -> Vec<(String, String)> {
    let mut headers: Vec<_> = request
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                "[redacted]".to_string()
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect();
    headers.sort();
    headers
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let span = info_span!("http_request", method = %request.method(), url = %request.url());

        span.in_scope(|| {
            if self.level == LogLevel::Debug {
                debug!(
                    headers = ?redacted_headers(&request),
                    body_len = request.body().map_or(0, Bytes::len),
                    "sending request"
                );
            } else {
                info!("sending request");
            }
        });

        // Take the service that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let level = self.level;

        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        if level == LogLevel::Debug {
                            debug!(
                                status = response.status(),
                                body_len = response.body().len(),
                                elapsed_ms,
                                "request completed"
                            );
                        } else {
                            info!(status = response.status(), elapsed_ms, "request completed");
                        }
                    }
                    Ok(response) => {
                        warn!(status = response.status(), elapsed_ms, "API returned an error status");
                    }
                    Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}
