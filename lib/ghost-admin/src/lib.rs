//! Minimal HTTP transport for the Ghost Admin JSON API.
//!
//! [`AdminClient`] validates a base address once, builds requests against it
//! and runs each one through an injected [`HttpClient`] under a cancellable
//! [`Context`], decoding `2xx` bodies into a [`Destination`].
//!
//! # Example
//!
//! ```ignore
//! use ghost_admin::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Site {
//!     title: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct SiteEnvelope {
//!     site: Site,
//! }
//!
//! let admin = AdminClient::new("https://demo.ghost.io", HyperClient::new())?;
//! let request = admin.new_empty_request(Method::Get, "ghost/api/admin/site/")?;
//!
//! let ctx = Context::background().with_timeout(Duration::from_secs(10));
//! let mut envelope = SiteEnvelope::default();
//! admin.send_json(Some(&ctx), request, &mut envelope).await?;
//! println!("{}", envelope.site.title);
//! ```
//!
//! Authentication is the executor's job: wrap [`HyperClient`] with a layer or
//! your own [`HttpClient`] that adds the `Authorization` header.

mod admin;
mod client;
mod config;
mod connector;
mod context;
mod destination;
pub mod middleware;
pub mod prelude;

pub use admin::{AdminClient, DEFAULT_USER_AGENT};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use context::Context;
pub use destination::Destination;

// Re-export core types
pub use ghost_admin_core::{
    APPLICATION_JSON, Error, HttpClient, Method, Request, RequestBuilder, Response, Result,
    StatusCode, from_json, from_json_opt, header, opt, to_json,
};

// Re-export crates that appear in the public API
pub use tokio_util::sync::CancellationToken;
pub use tower;
pub use url;
