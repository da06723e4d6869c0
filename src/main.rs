use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting Zoom bridge server v{}", clap::crate_version!());

    let snapshot_store = service::init_snapshot_store(&config);
    let app_state = AppState::new(config, &snapshot_store);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}
