// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::env;

use todo_api::api::router;
use todo_api::auth::{GoogleIdTokenVerifier, SessionTokenService};
use todo_api::config::AppConfig;
use todo_api::state::AppState;
use todo_api::store::TodoStore;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    if format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // A misconfigured deployment must not come up at all.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match TodoStore::open(&config.database_path) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, path = %config.database_path.display(), "cannot open todo database");
            std::process::exit(1);
        }
    };

    if config.mode.is_development() {
        if let Err(err) = store.seed_defaults() {
            tracing::warn!(error = %err, "seeding failed");
        }
    }

    let sessions = match SessionTokenService::from_config(&config.session) {
        Ok(sessions) => sessions,
        Err(err) => {
            tracing::error!(error = %err, "invalid session token configuration");
            std::process::exit(1);
        }
    };

    let state = AppState::new(store, sessions, GoogleIdTokenVerifier::new(), config.clone());
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "cannot bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, mode = ?config.mode, "todo-api listening (docs at /docs)");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server failed");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
