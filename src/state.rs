//! Application state passed to all handlers.

use std::sync::Arc;

use crate::auth::{AuthBackend, SessionStore, SimulatedBackend};
use crate::config::PortalConfig;

#[derive(Clone)]
pub struct AppState {
    /// The one session of this portal instance
    pub session: SessionStore,
    pub config: Arc<PortalConfig>,
}

impl AppState {
    pub fn new(session: SessionStore, config: PortalConfig) -> Self {
        Self {
            session,
            config: Arc::new(config),
        }
    }

    /// State backed by the simulated sign-in delay from `config`.
    pub fn simulated(config: PortalConfig) -> Self {
        let backend: Arc<dyn AuthBackend> = Arc::new(SimulatedBackend::new(config.login_delay()));
        Self::new(SessionStore::new(backend), config)
    }
}
