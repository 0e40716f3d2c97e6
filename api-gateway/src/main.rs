//! Market price sync gateway

use std::process::ExitCode;
use std::sync::Arc;

use api_gateway::api::response::{ErrorResponse, SyncResponse};
use api_gateway::config::AppConfig;
use api_gateway::{create_router, AppState};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use price_sync::{PriceSyncConfig, PriceSyncService};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// Market price sync server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the sync endpoint over HTTP
    Serve {
        /// Listening address, defaults to HOST:PORT
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Run one sync pass and print the response body
    Sync,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Debug level when DEBUG=1 is set
    let debug_enabled = std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);
    let log_level = if debug_enabled { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    // Logs go to stderr so `sync` output stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Debug logging enabled");

    let config = PriceSyncConfig::from_env();
    let service = match PriceSyncService::with_config(&config).await {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to initialize price sync: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| AppConfig::new().addr());
            match serve(service, &addr, log_level).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Server error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Sync => run_once(&service).await,
    }
}

async fn serve(service: PriceSyncService, addr: &str, log_level: Level) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(service));
    let app = create_router(state, log_level);

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn run_once(service: &PriceSyncService) -> ExitCode {
    let (body, code) = match service.sync_prices().await {
        Ok(report) => (serde_json::to_string(&SyncResponse::from(report)), ExitCode::SUCCESS),
        Err(e) => {
            error!("Price sync failed: {}", e);
            (serde_json::to_string(&ErrorResponse::new(e.to_string())), ExitCode::FAILURE)
        }
    };

    match body {
        Ok(body) => {
            println!("{}", body);
            code
        }
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
