use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use campus_portal::app;
use campus_portal::auth::{Role, SessionState, SessionStore, SimulatedBackend};
use campus_portal::config::PortalConfig;
use campus_portal::state::AppState;
use campus_portal::testing::{FailingBackend, InstantBackend};

fn server_with(store: SessionStore) -> TestServer {
    let state = AppState::new(store, PortalConfig::default());
    TestServer::new(app::router(state)).unwrap()
}

fn instant() -> (SessionStore, TestServer) {
    let store = SessionStore::new(Arc::new(InstantBackend));
    let server = server_with(store.clone());
    (store, server)
}

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

#[tokio::test]
async fn signed_out_admin_redirects_to_login() {
    let (_, server) = instant();

    let response = server.get("/admin").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn public_pages_render_when_signed_out() {
    let (_, server) = instant();

    server.get("/").await.assert_status_ok();

    let login = server.get("/login?role=faculty").await;
    login.assert_status_ok();
    assert!(login.text().contains("value=\"faculty\" checked"));
}

#[tokio::test]
async fn login_form_signs_in_and_redirects_home() {
    let (store, server) = instant();

    let response = server
        .post("/login")
        .form(&[("handle", "71021"), ("secret", "secret1"), ("role", "student")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/student");
    assert_eq!(store.snapshot().user().map(|u| u.role), Some(Role::Student));

    let root = server.get("/").await;
    assert_eq!(location(&root), "/student");
}

#[tokio::test]
async fn login_form_shows_validation_errors() {
    let (store, server) = instant();

    let response = server
        .post("/login")
        .form(&[("handle", "jdoe"), ("secret", "secret1"), ("role", "student")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Enter a valid Email or Student Reg No"));

    let response = server
        .post("/login")
        .form(&[("handle", "jdoe"), ("secret", "123"), ("role", "faculty")])
        .await;
    assert!(response.text().contains("Password must be at least 6 characters"));

    assert_eq!(store.snapshot(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn backend_failure_is_shown_on_the_form() {
    let server = server_with(SessionStore::new(Arc::new(FailingBackend::new("offline"))));

    let response = server
        .post("/login")
        .form(&[("handle", "root"), ("secret", "secret1"), ("role", "admin")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Login Failed. Please check your credentials."));
}

#[tokio::test]
async fn cross_role_screen_redirects_to_own_dashboard() {
    let (store, server) = instant();
    store.login("prof@kathir.edu", "secret1", Role::Faculty).await.unwrap();

    let response = server.get("/admin/manage-students").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/faculty");
}

#[tokio::test]
async fn own_screen_renders_with_badge() {
    let (store, server) = instant();
    store.login("jane.doe@kathir.edu", "secret1", Role::Student).await.unwrap();

    let response = server.get("/student/profile").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("My Profile"));
    assert!(html.contains("Jane Doe (Student)"));
}

#[tokio::test]
async fn unknown_screens_are_not_found() {
    let (store, server) = instant();

    server.get("/+not-found").await.assert_status(StatusCode::NOT_FOUND);

    store.login("71021", "secret1", Role::Student).await.unwrap();
    server.get("/student/payroll").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/Admin").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trailing_slash_redirects_to_dashboard() {
    let (store, server) = instant();
    store.login("71021", "secret1", Role::Student).await.unwrap();

    let response = server.get("/student/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/student");

    let dashboard = server.get(&location(&response)).await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains("Student Dashboard"));

    let response = server.get("/student/profile/").await;
    response.assert_status_ok();
    assert!(response.text().contains("My Profile"));
}

#[tokio::test]
async fn undecodable_first_segment_is_not_found() {
    let (store, server) = instant();

    server.get("/%FF").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/%FF/profile").await.assert_status(StatusCode::NOT_FOUND);

    store.login("71021", "secret1", Role::Student).await.unwrap();
    let response = server.get("/%FF").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Oops!"));
}

#[tokio::test]
async fn logout_clears_session_for_every_role_screen() {
    let (store, server) = instant();
    store.login("root", "secret1", Role::Admin).await.unwrap();

    let response = server.post("/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    for role in Role::ALL {
        let response = server.get(&role.home_path()).await;
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn screens_show_loading_while_authenticating() {
    let store = SessionStore::new(Arc::new(SimulatedBackend::new(Duration::from_secs(60))));
    let server = server_with(store.clone());

    let mut rx = store.subscribe();
    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.login("71021", "secret1", Role::Student).await })
    };
    rx.wait_for(SessionState::is_authenticating).await.unwrap();

    let response = server.get("/student/profile").await;
    response.assert_status_ok();
    assert!(response.text().contains("Signing in..."));

    // No redirect from public pages mid-login either
    server.get("/login").await.assert_status_ok();

    let api = server.get("/api/session").await;
    api.assert_json(&serde_json::json!({ "status": "authenticating" }));

    store.logout();
    pending.abort();
}

#[tokio::test]
async fn session_api_reports_signed_in_user() {
    let (store, server) = instant();
    store.login("71021", "secret1", Role::Student).await.unwrap();

    let json: serde_json::Value = server.get("/api/session").await.json();
    assert_eq!(json["status"], "authenticated");
    assert_eq!(json["user"]["role"], "student");
    assert_eq!(json["user"]["handle"], "71021");
}
