//! Page handlers for the portal shell.

pub mod screens;

use askama::Template;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth::{Role, SessionState};
use crate::state::AppState;

pub use screens::{dashboard, screen};

pub struct RoleLink {
    pub href: String,
    pub label: &'static str,
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub roles: Vec<RoleLink>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// GET / - Landing page with one entry per role
pub async fn landing() -> Html<String> {
    let roles = Role::ALL
        .into_iter()
        .map(|role| RoleLink {
            href: format!("/login?role={}", role),
            label: role.label(),
        })
        .collect();
    let template = LandingTemplate { roles };
    Html(template.render().unwrap_or_default())
}

/// GET /api/session - Current session for badges and spinners
pub async fn session_snapshot(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.session.snapshot())
}

/// Fallback for every unmatched path. `/student/` and friends redirect to
/// the path without the trailing slash, which the router does match.
pub async fn not_found(uri: Uri) -> Response {
    match canonical_path(uri.path()) {
        Some(canonical) => Redirect::to(&canonical).into_response(),
        None => not_found_page(uri.path()).into_response(),
    }
}

/// `path` without trailing slashes, or `None` if it has none to strip.
fn canonical_path(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.len() == path.len() || trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

pub fn not_found_page(path: &str) -> (StatusCode, Html<String>) {
    let template = NotFoundTemplate {
        path: path.to_string(),
    };
    (StatusCode::NOT_FOUND, Html(template.render().unwrap_or_default()))
}
