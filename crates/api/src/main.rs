use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harmony_api::config::{HarmonySettings, ServerConfig};
use harmony_api::router::build_app_router;
use harmony_api::state::{Advice, AppState};
use harmony_core::advice::ConfigHandle;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harmony_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        enabled = config.harmony.interception.enabled,
        packages = ?config.harmony.interception.packages,
        "Loaded server configuration"
    );

    // --- Response advice ---
    let advice = Advice::builder()
        .defaults(config.harmony.success_defaults())
        .config(config.harmony.interception.clone())
        .build()
        .expect("Failed to build response advice");

    // --- Config reload (SIGHUP) ---
    let reload_handle = tokio::spawn(reload_on_hangup(advice.config().clone()));

    // --- App state ---
    let state = AppState { advice };

    // --- Router ---
    let app = build_app_router(state, &config).expect("Failed to build router");

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Drain in-flight requests for at most `shutdown_timeout_secs` once a
    // termination signal arrives.
    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            log_server_exit(result);
        }
        () = shutdown_signal() => {
            let _ = drain_tx.send(());
            let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
            match tokio::time::timeout(shutdown_timeout, &mut server).await {
                Ok(result) => log_server_exit(result),
                Err(_) => {
                    tracing::warn!(?shutdown_timeout, "In-flight requests did not drain in time");
                    server.abort();
                }
            }
        }
    }

    reload_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

fn log_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::info!("Server stopped accepting connections"),
        Ok(Err(err)) => tracing::error!(error = %err, "Server error"),
        Err(err) => tracing::error!(error = %err, "Server task failed"),
    }
}

/// Re-read `.env` on SIGHUP and publish the new `HARMONY_*` interception config
/// atomically.
///
/// An invalid reload is logged and the previous config stays in effect.
#[cfg(unix)]
async fn reload_on_hangup(handle: ConfigHandle) {
    let mut hangup = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
    {
        Ok(signal) => signal,
        Err(err) => {
            tracing::warn!(error = %err, "Config reload on SIGHUP unavailable");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        if let Err(err) = dotenvy::dotenv_override() {
            tracing::debug!(error = %err, "No .env file reloaded");
        }
        match HarmonySettings::from_env() {
            Ok(settings) => {
                tracing::info!(
                    enabled = settings.interception.enabled,
                    packages = ?settings.interception.packages,
                    "Reloaded interception config"
                );
                handle.replace(settings.interception);
            }
            Err(err) => tracing::error!(error = %err, "Ignoring invalid interception config"),
        }
    }
}

#[cfg(not(unix))]
async fn reload_on_hangup(_handle: ConfigHandle) {}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
