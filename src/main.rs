use authorization_header::{app, config};
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Load configuration
    dotenvy::dotenv().ok();
    let cfg = config::Config::from_env()?;
    info!(
        port = cfg.port,
        scheme = cfg.auth.scheme(),
        attach_key = cfg.auth.attach_key(),
        compare = cfg.auth.expected_token().is_some(),
        "Starting authorization header demo"
    );

    let port = cfg.port;
    let app: Router = app::build_router(cfg);

    // Bind address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "Listening on");

    // Server with graceful shutdown
    let server = axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        error!(error = %e, "Server error");
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "ctrl-c",
        _ = terminate => "SIGTERM",
    };

    info!(signal = received, "Shutting down");
}
