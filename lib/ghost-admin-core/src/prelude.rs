//! Prelude module for convenient imports.
//!
//! ```ignore
//! use ghost_admin_core::prelude::*;
//! ```

pub use crate::{
    Error, HttpClient, Method, Request, RequestBuilder, Response, Result, from_json, opt, to_json,
};
