// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, process::ExitCode, time::Duration};

use axum_server::Handle;
use inkwell_auth::{
    api::router,
    config::{AuthConfig, DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, PORT_ENV},
    state::AppState,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Secrets are checked before anything is bound; no secrets, no traffic.
    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid auth configuration, refusing to start");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        access_ttl_secs = config.access_ttl().as_secs(),
        refresh_ttl_secs = config.refresh_ttl().as_secs(),
        "Auth configuration loaded"
    );

    let app = router(AppState::new(config));

    let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, %host, port, "Failed to parse bind address");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    tracing::info!(%addr, "Inkwell auth server listening (docs at /docs)");

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
