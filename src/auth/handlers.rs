//! Authentication handlers for login and logout.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::{AuthError, Role};
use crate::routes::LOGIN_PATH;
use crate::state::AppState;
use crate::validation::validate_login;

/// One entry of the role picker
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn role_options(selected: Role) -> Vec<RoleOption> {
    Role::ALL
        .into_iter()
        .map(|role| RoleOption {
            value: role.as_str(),
            label: role.label(),
            selected: role == selected,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub handle: String,
    pub roles: Vec<RoleOption>,
    pub version: &'static str,
}

impl LoginTemplate {
    fn new(role: Role, handle: &str, error: Option<&str>) -> Self {
        Self {
            error: error.map(str::to_string),
            handle: handle.to_string(),
            roles: role_options(role),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn page(self) -> Response {
        Html(self.render().unwrap_or_default()).into_response()
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    /// Email address or register number
    pub handle: String,
    pub secret: String,
    pub role: String,
}

/// GET /login - Show login page, preselecting `?role=` when it names a role
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let role = query
        .role
        .and_then(|role| role.parse().ok())
        .unwrap_or(Role::Student);
    let template = LoginTemplate::new(role, "", None);
    Html(template.render().unwrap_or_default())
}

/// POST /login - Validate the form and sign in
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let Ok(role) = form.role.parse::<Role>() else {
        return LoginTemplate::new(Role::Student, &form.handle, Some("Please choose a role")).page();
    };

    if let Err(rejection) = validate_login(&form.handle, &form.secret, role) {
        return LoginTemplate::new(role, &form.handle, Some(rejection.message())).page();
    }

    match state.session.login(&form.handle, &form.secret, role).await {
        Ok(user) => Redirect::to(&user.role.home_path()).into_response(),
        Err(AuthError::AlreadyAuthenticated) => match state.session.snapshot().user() {
            Some(user) => Redirect::to(&user.role.home_path()).into_response(),
            None => Redirect::to(LOGIN_PATH).into_response(),
        },
        Err(e) => LoginTemplate::new(role, &form.handle, Some(e.user_message())).page(),
    }
}

/// POST /logout - Sign out and return to the login page
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session.logout();
    Redirect::to(LOGIN_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_options_mark_selection() {
        let options = role_options(Role::Faculty);
        assert_eq!(options.len(), 3);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["faculty"]);
    }

    #[test]
    fn test_login_template_renders_error() {
        let html = LoginTemplate::new(Role::Admin, "root", Some("Please enter your password"))
            .render()
            .unwrap();
        assert!(html.contains("Please enter your password"));
        assert!(html.contains("value=\"root\""));
    }
}
