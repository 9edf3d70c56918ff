use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_portal::{app, config::PortalConfig, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::load();
    let bind_addr = config.bind_addr();
    tracing::info!(
        login_delay_ms = config.login_delay_ms,
        "Simulated sign-in enabled"
    );

    let app = app::router(AppState::simulated(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

    tracing::info!("Portal running on http://{}", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
