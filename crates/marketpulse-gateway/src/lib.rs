//! marketpulse gateway library entry.
//!
//! This crate wires config, the snapshot publisher, the JSON API, and
//! operational endpoints into one axum service. It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod http;
pub mod obs;
pub mod ops;
pub mod realtime;
pub mod router;
