//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::VitaeConfig;
use crate::middleware::ExpiryGuard;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the résumé
/// backend client, and the session-expiry guard.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: VitaeConfig,
    api: ApiClient,
    expiry: ExpiryGuard,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: VitaeConfig) -> Self {
        let api = ApiClient::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                expiry: ExpiryGuard::default(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &VitaeConfig {
        &self.inner.config
    }

    /// Get a reference to the résumé backend client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the session-expiry guard.
    #[must_use]
    pub fn expiry(&self) -> &ExpiryGuard {
        &self.inner.expiry
    }
}
