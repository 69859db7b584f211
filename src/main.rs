use std::path::PathBuf;

use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appcast::config::Config;
use appcast::handlers;
use appcast::store::{AppState, Store};

#[derive(Parser, Debug)]
#[command(name = "appcast")]
#[command(about = "App-update metadata and device license server")]
struct Cli {
    /// Directory for the update and license JSON documents (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize the two persisted documents
    let store = Store::new(&config.data_dir);
    store.init().expect("Failed to initialize data files");
    tracing::info!("Update document: {}", store.update_path().display());
    tracing::info!("License document: {}", store.license_path().display());

    let state = AppState { store };

    // Build the application router
    let app = Router::new()
        // Operator endpoints
        .merge(handlers::admin::router())
        // Device endpoints + health
        .merge(handlers::api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Appcast server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
