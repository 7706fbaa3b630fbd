//! `pr-reviewer` entry point.
//!
//! Composition root for the service:
//!
//! 1. **Read configuration** from the environment ([`config::Config`]).
//! 2. **Wire observability**: `tracing-subscriber` with a JSON or pretty
//!    formatter and, when an OTLP endpoint is configured, an OpenTelemetry
//!    exporter.
//! 3. **Construct infrastructure**: one [`storage::InMemoryRepository`] shared
//!    by every service through the repository ports.
//! 4. **Serve** the [`api`] router until SIGINT or SIGTERM, then drain
//!    in-flight requests for at most the shutdown timeout.

mod config;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};

use api::AppState;
use reviewers::{PullRequestService, TeamService, UserService};
use storage::InMemoryRepository;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(&config)?;

    let result = run(config).await;
    if let Err(err) = &result {
        error!(error = %err, "server terminated with error");
    }

    telemetry.shutdown();
    result
}

async fn run(config: Config) -> Result<()> {
    let repo = Arc::new(InMemoryRepository::new());
    let state = AppState {
        teams: TeamService::new(repo.clone(), repo.clone()),
        users: UserService::new(repo.clone()),
        pull_requests: PullRequestService::new(repo.clone(), repo),
    };

    let app = api::router(Arc::new(state)).layer(TimeoutLayer::new(config.request_timeout));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        "pr-reviewer listening"
    );

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { trigger.notified().await })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            return joined.context("server task panicked")?.context("server failed");
        }
        () = shutdown_signal() => {}
    }

    info!(
        timeout_ms = config.shutdown_timeout.as_millis() as u64,
        "shutdown signal received, draining requests"
    );
    stop.notify_one();

    match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
        Ok(joined) => joined.context("server task panicked")?.context("server failed")?,
        Err(_) => {
            warn!("shutdown timeout elapsed, aborting remaining requests");
            server.abort();
        }
    }

    info!("pr-reviewer stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
