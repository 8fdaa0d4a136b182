//! Vidstream - video catalog backend with range-aware streaming
//!
//! This library crate exposes the server pieces for integration testing.

pub mod config;
pub mod server;
pub mod streaming;
