// src/main.rs

use kartu_pelajar::{
    config::Config, services::auth_service, state::AppState, store::Store, web,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kartu_pelajar=debug,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Starting Kartu Pelajar Digital backend...");

    let config = Config::from_env();

    // --- Store + demo data ---
    // All state is process-lifetime only; the seed gives a fresh instance the
    // same demo dataset the original deployment ships with.
    let store = Store::new();
    let admin_hash = auth_service::hash_password(&config.admin_password).await?;
    store.lock().await.seed(&config.admin_username, admin_hash);
    tracing::info!(
        "✅ Data initialized: admin '{}', {} sample students",
        config.admin_username,
        store.lock().await.siswa.len()
    );

    // --- Router + middlewares ---
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app_state = AppState::new(store, config);
    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            // The admin frontend is served separately; the API stays open to
            // any origin, matching the original deployment.
            .layer(CorsLayer::permissive()),
    );

    // --- Serve ---
    tracing::info!("📡 Listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
