//! In-memory session store: the single source of truth for who is signed in.
//!
//! The state lives in a `watch` channel so the route guard (and anything
//! else rendering a badge or spinner) can subscribe to changes. All
//! transitions go through `send_if_modified`, which makes each
//! check-and-set atomic with respect to other callers.
//!
//! Legal transitions:
//! - `Unauthenticated -> Authenticating` (login starts)
//! - `Authenticating -> Authenticated | Unauthenticated` (login ends, or logout)
//! - `Authenticated -> Unauthenticated` (logout)

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

use super::backend::AuthBackend;
use super::error::AuthError;
use super::user::{Role, User};
use crate::validation::validate_login;

/// Whether, and as whom, someone is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self, SessionState::Authenticating)
    }
}

/// Cloneable handle to the session. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<SessionState>,
    backend: Arc<dyn AuthBackend>,
    /// Bumped when a login starts and on every logout. A login only
    /// commits if the counter still holds the value it started with.
    attempt: AtomicU64,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            inner: Arc::new(Inner {
                state,
                backend,
                attempt: AtomicU64::new(0),
            }),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Sign in as `role`.
    ///
    /// Inputs are validated first; invalid input fails without touching
    /// the state. Only one login may be in flight, and a signed-in user
    /// must log out before logging in again.
    ///
    /// The backend call runs on its own task, so dropping this future does
    /// not strand the store in `Authenticating`.
    pub async fn login(&self, handle: &str, secret: &str, role: Role) -> Result<User, AuthError> {
        validate_login(handle, secret, role)?;
        let attempt = self.inner.begin_attempt()?;
        tracing::info!(%role, attempt, "Login started");

        let inner = Arc::clone(&self.inner);
        let handle = handle.trim().to_string();
        let secret = secret.to_string();
        let task = tokio::spawn(async move {
            let result = inner.backend.authenticate(&handle, &secret, role).await;
            inner.finish_attempt(attempt, result)
        });

        let result = match task.await {
            Ok(result) => result,
            Err(e) => self
                .inner
                .finish_attempt(attempt, Err(AuthError::Backend(e.to_string()))),
        };

        match &result {
            Ok(user) => tracing::info!(user_id = %user.id, %role, "Login succeeded"),
            Err(e) => tracing::warn!(%role, "Login failed: {}", e),
        }
        result
    }

    /// Sign out. Calling this while already signed out does nothing.
    /// A login still in flight is abandoned and resolves with
    /// [`AuthError::Aborted`]: committing it would move a signed-out session
    /// straight to `Authenticated`, which no legal transition allows.
    pub fn logout(&self) {
        let inner = &self.inner;
        let changed = inner.state.send_if_modified(|state| {
            if matches!(state, SessionState::Unauthenticated) {
                return false;
            }
            inner.attempt.fetch_add(1, Ordering::AcqRel);
            *state = SessionState::Unauthenticated;
            true
        });

        if changed {
            tracing::info!("Logged out");
        }
    }
}

impl Inner {
    fn begin_attempt(&self) -> Result<u64, AuthError> {
        let mut outcome = Err(AuthError::LoginInProgress);
        self.state.send_if_modified(|state| match state {
            SessionState::Unauthenticated => {
                outcome = Ok(self.attempt.fetch_add(1, Ordering::AcqRel) + 1);
                *state = SessionState::Authenticating;
                true
            }
            SessionState::Authenticating => false,
            SessionState::Authenticated(_) => {
                outcome = Err(AuthError::AlreadyAuthenticated);
                false
            }
        });
        outcome
    }

    fn finish_attempt(&self, attempt: u64, result: Result<User, AuthError>) -> Result<User, AuthError> {
        let mut outcome = Err(AuthError::Aborted);
        self.state.send_if_modified(|state| {
            let current = self.attempt.load(Ordering::Acquire) == attempt;
            if !current || !state.is_authenticating() {
                tracing::debug!(attempt, "Discarding abandoned login");
                return false;
            }
            match result {
                Ok(user) => {
                    *state = SessionState::Authenticated(user.clone());
                    outcome = Ok(user);
                }
                Err(e) => {
                    *state = SessionState::Unauthenticated;
                    outcome = Err(e);
                }
            }
            true
        });
        outcome
    }
}
