//! Errors surfaced by [`SessionStore::login`](super::SessionStore::login).

use crate::validation::LoginRejection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Empty or malformed handle/secret
    #[error("invalid credentials: {0}")]
    InvalidCredentials(LoginRejection),
    /// Another login is still authenticating
    #[error("a login is already in progress")]
    LoginInProgress,
    /// A user is signed in; they must log out first
    #[error("already signed in")]
    AlreadyAuthenticated,
    /// Logout was called while this login was still authenticating
    #[error("login abandoned by logout")]
    Aborted,
    /// The authentication backend failed (network, rejected credentials)
    #[error("authentication backend error: {0}")]
    Backend(String),
}

impl AuthError {
    /// Message safe to show on the login screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials(rejection) => rejection.message(),
            AuthError::LoginInProgress => "Signing in, please wait",
            AuthError::AlreadyAuthenticated => "You are already signed in",
            AuthError::Aborted => "Login was cancelled",
            AuthError::Backend(_) => "Login Failed. Please check your credentials.",
        }
    }
}

impl From<LoginRejection> for AuthError {
    fn from(rejection: LoginRejection) -> Self {
        AuthError::InvalidCredentials(rejection)
    }
}
