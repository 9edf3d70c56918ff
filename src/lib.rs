pub mod app;
pub mod auth;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod routes;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod validation;
