//! Tower layers for [`crate::HyperClient`].
//!
//! Add them with [`crate::HyperClientBuilder::layer`]. Credential injection
//! belongs here too: any `Layer` that rewrites the request headers works.

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
