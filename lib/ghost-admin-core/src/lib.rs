//! Core types and traits for the ghost-admin JSON transport.
//!
//! This crate has no async runtime dependency. It provides:
//! - [`Method`] - HTTP method tokens
//! - [`Request`] and [`RequestBuilder`] - outbound requests
//! - [`Response`] - buffered responses
//! - [`Error`] and [`Result`] - error handling
//! - [`HttpClient`] - the executor capability
//! - [`to_json`], [`from_json`], [`from_json_opt`] - JSON bodies
//! - [`opt`] - helpers for optional payload fields

mod body;
mod client;
mod error;
mod method;
pub mod opt;
pub mod prelude;
mod request;
mod response;

pub use body::{APPLICATION_JSON, from_json, from_json_opt, to_json};
pub use client::HttpClient;
pub use error::{Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
