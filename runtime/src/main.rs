use anyhow::{Context, Result};
use axum::{Router, routing::get};
use dotenvy::dotenv;
use std::{env, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use scooters_runtime::{
    AppState,
    ai::{CompletionsClient, GraphQaChain},
    config::load_config,
    graph::GraphClient,
    routes,
    storage::{FsTableStore, TableStore},
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "Server crashed");
        eprintln!("Server crashed: {err}");
    }
}

async fn run() -> Result<()> {
    init_tracing();
    dotenv().ok();

    let config = load_config()
        .await
        .context("Failed to load application configuration")?;

    // Fail fast on malformed datagen parameters before serving traffic.
    let settings = config
        .datagen
        .fleet_settings()
        .context("Invalid data generation parameters")?;
    info!(
        scooters = settings.scooters,
        parts_per_scooter = settings.parts_per_scooter,
        "datagen parameters resolved"
    );

    let store: Arc<dyn TableStore> = Arc::new(FsTableStore::new(&config.working_dir));
    let graph_client = Arc::new(GraphClient::new(config.graph.port));

    let qa = match env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let completions = Arc::new(CompletionsClient::new(
                key,
                config.ai.base_url.clone(),
                config.ai.model.clone(),
            ));
            Some(Arc::new(GraphQaChain::new(completions, graph_client.clone())))
        }
        _ => {
            warn!("OPENAI_API_KEY not set; /graph/ask will be unavailable");
            None
        }
    };

    let state = Arc::new(AppState {
        config: Arc::new(config),
        store,
        graph_client,
        qa,
    });

    // Permissive CORS so the browser-based workbench can call the proxy.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::query_routes())
        .merge(routes::generate_routes())
        .fallback(routes::unknown_operation)
        .layer(cors)
        .with_state(state.clone());

    let addr_string = format!("{}:{}", state.config.server.host, state.config.server.port);
    let addr = addr_string
        .parse::<SocketAddr>()
        .with_context(|| format!("Invalid server address: {addr_string}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;
    info!(%addr, "Fleet graph server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server encountered a fatal error")?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[inline]
async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                if stream.recv().await.is_some() {
                    info!("Received SIGTERM");
                }
            }
            Err(err) => warn!(error = %err, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received termination signal (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received termination signal (SIGTERM)");
        }
    }
}
