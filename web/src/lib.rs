use axum::http::HeaderValue;
use log::*;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod middleware;
mod params;
pub mod router;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let server_url = format!("{}:{}", interface, app_state.config.port);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    let cors_layer = cors_layer(&app_state.config);
    let router = router::define_routes(app_state).layer(cors_layer);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Reflects the caller's origin, methods and headers when any origin is allowed,
/// otherwise only the configured origins are admitted.
pub fn cors_layer(config: &service::config::Config) -> CorsLayer {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring invalid allowed origin {origin:?}: {e}");
                    None
                }
            })
            .collect();
        info!("CORS allowed origins: {:?}", config.allowed_origins);
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received, stopping server");
}
