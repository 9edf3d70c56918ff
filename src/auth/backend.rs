//! Authentication capability injected into the session store.
//!
//! The portal has no account server: [`SimulatedBackend`] waits a fixed
//! delay and accepts any credentials. A real backend implements the same
//! trait and can report failures through [`AuthError::Backend`].

use async_trait::async_trait;
use std::time::Duration;

use super::error::AuthError;
use super::user::{Role, User};

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn authenticate(&self, handle: &str, secret: &str, role: Role) -> Result<User, AuthError>;
}

/// Stand-in for a network call: sleeps, then signs anyone in.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_LOGIN_DELAY_MS))
    }
}

#[async_trait]
impl AuthBackend for SimulatedBackend {
    async fn authenticate(&self, handle: &str, _secret: &str, role: Role) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(User::from_credentials(handle, role))
    }
}
