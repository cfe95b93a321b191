//! contentsync HTTP - admin API client
//!
//! Blocking [`reqwest`] implementation of [`ContentApi`](contentsync_core::ContentApi)
//! for the content-manager endpoints.

pub mod client;
pub mod response;

pub use client::{AdminClient, ClientOptions};
pub use response::safe_parse;
