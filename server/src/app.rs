use std::sync::Arc;

use quote_engine::ComposeOptions;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: ServerConfig,
    /// Cancelled when the process should stop serving.
    shutdown_token: CancellationToken,
}

impl SharedState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    pub fn compose_options(&self) -> ComposeOptions {
        self.inner.config.compose_options()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.inner.config.max_upload_bytes
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
