//! Prelude module for convenient imports.
//!
//! ```ignore
//! use ghost_admin::prelude::*;
//! ```

pub use std::time::Duration;

pub use serde::{Deserialize, Serialize};

pub use crate::{
    AdminClient, Context, Destination, Error, HttpClient, HyperClient, Method, Request, Response,
    Result, opt,
};
