//! Route classification and the screen registry.
//!
//! Every path falls into exactly one [`RouteClass`]. Classification looks
//! only at the first path segment and needs no stored state.

use crate::auth::Role;

/// Landing page with the role picker
pub const LANDING_PATH: &str = "/";

/// Login form
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicRoute {
    Landing,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public(PublicRoute),
    RoleScoped(Role),
    Unknown,
}

/// Classify a navigation path. Query strings and fragments are ignored.
pub fn classify(path: &str) -> RouteClass {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let Some(first) = path.split('/').find(|segment| !segment.is_empty()) else {
        return RouteClass::Public(PublicRoute::Landing);
    };

    let first = match urlencoding::decode(first) {
        Ok(decoded) => decoded,
        Err(_) => return RouteClass::Unknown,
    };

    if first == "login" {
        return RouteClass::Public(PublicRoute::Login);
    }

    match first.parse::<Role>() {
        Ok(role) => RouteClass::RoleScoped(role),
        Err(_) => RouteClass::Unknown,
    }
}

/// A screen under one of the role dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub role: Role,
    /// Path segment after the role, empty for the dashboard
    pub slug: &'static str,
    pub title: &'static str,
}

const fn screen(role: Role, slug: &'static str, title: &'static str) -> Screen {
    Screen { role, slug, title }
}

pub const SCREENS: &[Screen] = &[
    screen(Role::Student, "", "Student Dashboard"),
    screen(Role::Student, "profile", "My Profile"),
    screen(Role::Student, "academics", "Academic Details"),
    screen(Role::Student, "achievements", "Achievements"),
    screen(Role::Student, "discipline", "Discipline Record"),
    screen(Role::Student, "query", "Raise a Query"),
    screen(Role::Faculty, "", "Faculty Dashboard"),
    screen(Role::Faculty, "profile", "Faculty Profile"),
    screen(Role::Faculty, "students", "Student List"),
    screen(Role::Faculty, "updates", "Upload Marks"),
    screen(Role::Faculty, "discipline", "Discipline Reports"),
    screen(Role::Admin, "", "Admin Dashboard"),
    screen(Role::Admin, "manage-students", "Manage Students"),
    screen(Role::Admin, "manage-faculty", "Manage Faculty"),
    screen(Role::Admin, "departments", "Departments"),
    screen(Role::Admin, "discipline", "Legal & Discipline"),
    screen(Role::Admin, "illegal-activities", "Illegal Activities"),
];

impl Screen {
    /// Find the screen at `/{role}/{slug}`. An empty slug is the dashboard.
    pub fn lookup(role: Role, slug: &str) -> Option<&'static Screen> {
        let slug = slug.trim_matches('/');
        SCREENS.iter().find(|s| s.role == role && s.slug == slug)
    }

    /// Screens for one role, dashboard first.
    pub fn for_role(role: Role) -> impl Iterator<Item = &'static Screen> {
        SCREENS.iter().filter(move |s| s.role == role)
    }

    pub fn path(&self) -> String {
        if self.slug.is_empty() {
            self.role.home_path()
        } else {
            format!("{}/{}", self.role.home_path(), self.slug)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_public() {
        assert_eq!(classify("/"), RouteClass::Public(PublicRoute::Landing));
        assert_eq!(classify(""), RouteClass::Public(PublicRoute::Landing));
        assert_eq!(classify("/login"), RouteClass::Public(PublicRoute::Login));
        assert_eq!(classify("/login?role=admin"), RouteClass::Public(PublicRoute::Login));
        assert_eq!(classify("/?role=admin"), RouteClass::Public(PublicRoute::Landing));
    }

    #[test]
    fn test_classify_role_scoped() {
        assert_eq!(classify("/student"), RouteClass::RoleScoped(Role::Student));
        assert_eq!(classify("/student/profile"), RouteClass::RoleScoped(Role::Student));
        assert_eq!(
            classify("/admin/manage-students"),
            RouteClass::RoleScoped(Role::Admin)
        );
        assert_eq!(classify("//faculty//"), RouteClass::RoleScoped(Role::Faculty));
        assert_eq!(classify("/%61dmin"), RouteClass::RoleScoped(Role::Admin));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("/Admin"), RouteClass::Unknown);
        assert_eq!(classify("/teacher/home"), RouteClass::Unknown);
        assert_eq!(classify("/+not-found"), RouteClass::Unknown);
        assert_eq!(classify("/logout"), RouteClass::Unknown);
        assert_eq!(classify("/%FF"), RouteClass::Unknown);
    }

    #[test]
    fn test_screen_lookup() {
        let dashboard = Screen::lookup(Role::Student, "").unwrap();
        assert_eq!(dashboard.title, "Student Dashboard");
        assert_eq!(dashboard.path(), "/student");

        let manage = Screen::lookup(Role::Admin, "manage-students").unwrap();
        assert_eq!(manage.path(), "/admin/manage-students");

        assert!(Screen::lookup(Role::Student, "manage-students").is_none());
        assert!(Screen::lookup(Role::Faculty, "nope").is_none());
    }

    #[test]
    fn test_every_role_has_a_dashboard() {
        for role in Role::ALL {
            let first = Screen::for_role(role).next().unwrap();
            assert_eq!(first.slug, "");
        }
    }
}
