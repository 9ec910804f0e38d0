//! JSON API surface and its error mapping.

pub mod api;
pub mod error;

pub use error::ApiError;
