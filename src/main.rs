//! Text Gateway - authenticated text endpoints with JSON event logging.
//!
//! This binary loads configuration, sets up logging and starts the HTTP server.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use text_gateway::{create_router, logging::init_logging, Config, RouterConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = Config::parse();

    init_logging(config.verbose);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    let version = env!("CARGO_PKG_VERSION");
    info!("Text Gateway v{}", version);

    if config.uses_fallback_token() {
        warn!("  API_TOKEN is not set - using the built-in fallback token");
        warn!("        Set API_TOKEN (or --api-token) before exposing this server");
    } else if config.uses_empty_token() {
        warn!("  API_TOKEN is empty - requests without an Authorization header are accepted");
    }

    let router_config = RouterConfig::new(config.api_token.clone())
        .with_tracing(!config.no_tracing)
        .with_body_limit(config.max_body_bytes);
    let router = create_router(router_config);

    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!("  Try: curl http://{}/health", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server shut down");
    ExitCode::SUCCESS
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
