//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates a temporary content root, a
//! config pointing at it, and the [`AppContext`]. The [`with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use tempfile::TempDir;

use vidstream::config::{Config, StreamingConfig};
use vidstream::server::{create_router, AppContext};

/// Deterministic, non-repeating-at-small-scale test payload.
pub fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Test harness wrapping an [`AppContext`] over a temporary content root.
pub struct TestHarness {
    pub ctx: AppContext,
    pub root: TempDir,
}

impl TestHarness {
    /// Create a harness whose content root holds `files`.
    pub fn with_files(files: &[(&str, &[u8])]) -> Self {
        let root = tempfile::tempdir().expect("failed to create content root");
        for (name, data) in files {
            std::fs::write(root.path().join(name), data).expect("failed to write fixture");
        }

        let config = Config {
            streaming: StreamingConfig::with_root(root.path()),
            ..Config::default()
        };

        Self {
            ctx: AppContext::new(config),
            root,
        }
    }

    /// Build the router without binding a socket.
    pub fn router(&self) -> axum::Router {
        create_router(self.ctx.clone(), None)
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server(files: &[(&str, &[u8])]) -> (Self, SocketAddr) {
        let harness = Self::with_files(files);
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}
