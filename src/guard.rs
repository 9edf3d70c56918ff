//! Route guard: keeps signed-out users off role screens and keeps
//! signed-in users inside their own role's screens.
//!
//! [`evaluate`] is the whole decision table and is pure. [`RouteGuard`]
//! wires it to the navigation and session channels and issues at most one
//! replace per evaluation. The guard only reads the session; it never
//! changes it.

use tokio::sync::watch;

use crate::auth::{SessionState, SessionStore};
use crate::routes::{LOGIN_PATH, RouteClass, classify};

/// What the navigation layer currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// No initial route yet (startup). Nothing is decided until it is ready.
    Pending,
    Ready(String),
}

impl Navigation {
    pub fn ready(path: impl Into<String>) -> Self {
        Navigation::Ready(path.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Stay,
    /// Replace the current entry (never push) with this path
    Replace(String),
}

/// Decide whether the current path may be shown for the current session.
pub fn evaluate(navigation: &Navigation, session: &SessionState) -> GuardDecision {
    let Navigation::Ready(path) = navigation else {
        return GuardDecision::Stay;
    };

    match (session, classify(path)) {
        (SessionState::Authenticating, _) => GuardDecision::Stay,
        (SessionState::Unauthenticated, RouteClass::RoleScoped(_)) => {
            GuardDecision::Replace(LOGIN_PATH.to_string())
        }
        (SessionState::Unauthenticated, _) => GuardDecision::Stay,
        (SessionState::Authenticated(user), RouteClass::Public(_)) => {
            GuardDecision::Replace(user.role.home_path())
        }
        (SessionState::Authenticated(user), RouteClass::RoleScoped(role)) if role == user.role => {
            GuardDecision::Stay
        }
        // Cross-role access goes back to the user's own dashboard
        (SessionState::Authenticated(user), RouteClass::RoleScoped(_)) => {
            GuardDecision::Replace(user.role.home_path())
        }
        (SessionState::Authenticated(_), RouteClass::Unknown) => GuardDecision::Stay,
    }
}

/// Outbound port to whatever owns navigation.
pub trait Navigator: Send + Sync {
    /// Replace the current route with `path`.
    fn replace(&self, path: &str);
}

/// Re-evaluates on every path change and every session change.
pub struct RouteGuard<N> {
    navigator: N,
    paths: watch::Receiver<Navigation>,
    session: watch::Receiver<SessionState>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N, paths: watch::Receiver<Navigation>, session: &SessionStore) -> Self {
        Self {
            navigator,
            paths,
            session: session.subscribe(),
        }
    }

    /// Evaluate once against the latest path and session, redirecting if
    /// needed.
    pub fn evaluate_now(&mut self) -> GuardDecision {
        let navigation = self.paths.borrow_and_update().clone();
        let session = self.session.borrow_and_update().clone();

        let decision = evaluate(&navigation, &session);
        if let GuardDecision::Replace(to) = &decision {
            if let Navigation::Ready(from) = &navigation {
                tracing::debug!(%from, %to, "Guard redirect");
            }
            self.navigator.replace(to);
        }
        decision
    }

    /// Run until the navigation source or the session store goes away.
    pub async fn run(mut self) {
        self.evaluate_now();
        loop {
            tokio::select! {
                changed = self.paths.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = self.session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            self.evaluate_now();
        }
        tracing::debug!("Route guard stopped");
    }
}
