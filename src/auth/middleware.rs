//! Route guard middleware and the signed-in request context.

use askama::Template;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::{SessionState, User};
use crate::guard::{GuardDecision, Navigation, evaluate};
use crate::routes::LOGIN_PATH;
use crate::state::AppState;

/// Run the route guard for every request. A redirect replaces the
/// requested page; otherwise the request goes through untouched.
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let navigation = Navigation::ready(request.uri().path());
    match evaluate(&navigation, &state.session.snapshot()) {
        GuardDecision::Stay => next.run(request).await,
        GuardDecision::Replace(to) => {
            tracing::debug!(from = %request.uri().path(), %to, "Guard redirect");
            Redirect::to(&to).into_response()
        }
    }
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub path: String,
}

/// Signed-in request context.
/// Add this as a handler parameter to require a signed-in user.
/// Redirects to /login when signed out and shows the loading page while a
/// login is still in flight.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    /// Resolve the signed-in user for a request to `path`.
    pub fn require(state: &AppState, path: &str) -> Result<Self, Response> {
        match state.session.snapshot() {
            SessionState::Authenticated(user) => Ok(AuthContext { user }),
            SessionState::Authenticating => {
                let template = LoadingTemplate {
                    path: path.to_string(),
                };
                Err(Html(template.render().unwrap_or_default()).into_response())
            }
            SessionState::Unauthenticated => Err(Redirect::to(LOGIN_PATH).into_response()),
        }
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthContext::require(state, parts.uri.path())
    }
}
