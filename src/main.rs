//! replikator-exporter
//!
//! Prometheus exporter for replikator replication state and backups. This is
//! the main entry point that initializes logging, configuration, and the
//! HTTP server.

use axum::{routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{debug, error, info, Level};

use replikator_exporter::cli::{Args, LogLevel};
use replikator_exporter::config::{
    resolve_config, show_config, validate_effective_config, Config,
};
use replikator_exporter::handlers::{health_handler, metrics_handler, root_handler};
use replikator_exporter::replikator::ReplikatorCommand;
use replikator_exporter::state::AppState;

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Logging initialized with level: {:?}", args.log_level);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("Configuration is valid");
            return Ok(());
        }

        return show_config(&config);
    }

    let config = resolve_config(&args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("Configuration invalid: {}", e);
        std::process::exit(1);
    }

    setup_logging(&args);

    info!("Starting replikator-exporter");

    let state = Arc::new(build_state(config)?);

    let addr: SocketAddr = format!(
        "{}:{}",
        state.config.effective_bind(),
        state.config.effective_port()
    )
    .parse()?;

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // Graceful shutdown on SIGINT/SIGTERM
    let shutdown_signal = async {
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
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    };

    let listener = TcpListener::bind(addr).await?;
    info!("replikator-exporter listening on http://{}", addr);

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal => {
            info!("Shutdown signal received, exiting...");
        }
    }

    info!("replikator-exporter stopped gracefully");
    Ok(())
}

/// Builds the shared application state with the production invoker.
fn build_state(config: Config) -> Result<AppState, prometheus::Error> {
    let binary = config.effective_replikator_bin();
    debug!("Using replikator binary at {}", binary.display());

    let invoker = Box::new(ReplikatorCommand::new(binary));
    AppState::new(config, invoker)
}
