use stellar_burgers::{
    AppState, FileCredentialStore, HttpBurgerApi, Store,
    api::ApiState,
    config::{AppConfig, Env},
    create_router,
    credentials::CredentialState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, the API client and credential store, the
/// startup fetches, then the HTTP shell.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast in production)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stellar_burgers=debug,tower_http=info,axum=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Session credentials and the burger API client
    let credentials =
        Arc::new(FileCredentialStore::new(&config.credentials_path)) as CredentialState;
    let api = Arc::new(HttpBurgerApi::new(&config.api_url, credentials.clone())) as ApiState;
    tracing::info!(api_url = %config.api_url, "burger API client ready");

    // 4. Store, with the session check and catalogue fetch running in the background
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(Store::new(api, credentials), config);
    let store = app_state.store.clone();
    tokio::spawn(async move { store.bootstrap().await });

    // 5. Router and server
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
