//! Request-scoped extraction of connection handles.
//!
//! Connection holders implement [`FromRequestParts`] so a handler can take
//! them as an extractor; the pooled connection itself is only checked out
//! for the duration of each store call.

pub use axum_core::extract::{FromRef, FromRequestParts};
pub use http::request::Parts;
