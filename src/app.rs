//! HTTP router for the portal shell.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Build the router. Every request passes through the route guard first.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        .route("/api/session", get(handlers::session_snapshot))
        .route("/{role}", get(handlers::dashboard))
        .route("/{role}/{*slug}", get(handlers::screen))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth::route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
