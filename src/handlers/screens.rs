//! Role dashboards and their screens.

use askama::Template;
use axum::{
    extract::{Path, rejection::PathRejection},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::not_found_page;
use crate::auth::{AuthContext, Role};
use crate::routes::Screen;

pub struct NavLink {
    pub href: String,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "screen.html")]
pub struct ScreenTemplate {
    pub title: &'static str,
    pub user_name: String,
    pub role_label: &'static str,
    pub nav: Vec<NavLink>,
}

/// GET /{role} - Role dashboard
pub async fn dashboard(
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    auth: Result<AuthContext, Response>,
) -> Response {
    match path {
        Ok(Path(role)) => open_screen(auth, &role, ""),
        Err(_) => not_found_page(uri.path()).into_response(),
    }
}

/// GET /{role}/{*slug} - Any other screen of a role
pub async fn screen(
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
    auth: Result<AuthContext, Response>,
) -> Response {
    match path {
        Ok(Path((role, slug))) => open_screen(auth, &role, &slug),
        Err(_) => not_found_page(uri.path()).into_response(),
    }
}

/// `/{anything}` also lands here, so the role is checked before the
/// session: a path naming no role is a 404 for everyone.
fn open_screen(auth: Result<AuthContext, Response>, role: &str, slug: &str) -> Response {
    let Ok(role) = role.parse::<Role>() else {
        return not_found_page(&screen_path(role, slug)).into_response();
    };
    match auth {
        Ok(auth) => render_screen(&auth, role, slug),
        Err(response) => response,
    }
}

fn screen_path(role: &str, slug: &str) -> String {
    if slug.is_empty() {
        format!("/{}", role)
    } else {
        format!("/{}/{}", role, slug)
    }
}

fn render_screen(auth: &AuthContext, role: Role, slug: &str) -> Response {
    // Unreachable behind the guard middleware
    if role != auth.user.role {
        return Redirect::to(&auth.user.role.home_path()).into_response();
    }

    let Some(screen) = Screen::lookup(role, slug) else {
        return not_found_page(&screen_path(role.as_str(), slug)).into_response();
    };

    let nav = Screen::for_role(role)
        .map(|s| NavLink {
            href: s.path(),
            title: s.title,
            active: s == screen,
        })
        .collect();

    let template = ScreenTemplate {
        title: screen.title,
        user_name: auth.user.name.clone(),
        role_label: role.label(),
        nav,
    };
    Html(template.render().unwrap_or_default()).into_response()
}
