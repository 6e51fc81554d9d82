//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use saiv_client::BackendClient;
use saiv_core::AppResult;
use saiv_core::config::AppConfig;

use crate::store::SessionStore;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// Cheap to clone: the configuration and store are `Arc`-wrapped and the
/// backend client shares its connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Unauthenticated backend client used for login
    pub backend: BackendClient,
    /// Signed-in browser sessions
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build the state from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let sessions = Arc::new(SessionStore::new(config.session.idle_timeout()));
        Ok(Self {
            config: Arc::new(config),
            backend,
            sessions,
        })
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}
