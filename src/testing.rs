//! Test doubles for the session store and route guard.
//!
//! - [`InstantBackend`] signs anyone in without waiting
//! - [`FailingBackend`] always fails with a backend error
//! - [`RecordingNavigator`] holds the current location and records replaces

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::auth::{AuthBackend, AuthError, Role, User};
use crate::guard::{Navigation, Navigator};

/// Backend that accepts any credentials immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantBackend;

#[async_trait]
impl AuthBackend for InstantBackend {
    async fn authenticate(&self, handle: &str, _secret: &str, role: Role) -> Result<User, AuthError> {
        Ok(User::from_credentials(handle, role))
    }
}

/// Backend that rejects every attempt.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    reason: String,
}

impl FailingBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl AuthBackend for FailingBackend {
    async fn authenticate(&self, _handle: &str, _secret: &str, _role: Role) -> Result<User, AuthError> {
        Err(AuthError::Backend(self.reason.clone()))
    }
}

/// In-memory navigation stack top. Starts [`Navigation::Pending`].
#[derive(Clone)]
pub struct RecordingNavigator {
    location: Arc<watch::Sender<Navigation>>,
    replaced: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        let (location, _) = watch::channel(Navigation::Pending);
        Self {
            location: Arc::new(location),
            replaced: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Receiver to hand to a [`RouteGuard`](crate::guard::RouteGuard).
    pub fn locations(&self) -> watch::Receiver<Navigation> {
        self.location.subscribe()
    }

    /// User-initiated navigation.
    pub fn navigate(&self, path: &str) {
        self.location.send_replace(Navigation::ready(path));
    }

    pub fn current(&self) -> Navigation {
        self.location.borrow().clone()
    }

    /// Every path the guard replaced to, oldest first.
    pub fn replaced(&self) -> Vec<String> {
        self.replaced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.replaced
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
        self.location.send_replace(Navigation::ready(path));
    }
}
