// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateTodoRequest, ExchangeTokenRequest, ExchangeTokenResponse, MeResponse, Todo,
        UpdateTodoRequest, UserSummary,
    },
    state::AppState,
};

pub mod auth;
pub mod e2e;
pub mod health;
pub mod todos;

pub fn router(state: AppState) -> Router {
    let mut v1_routes = Router::new()
        .route("/auth/google", post(auth::exchange_google_token))
        .route("/auth/me", get(auth::me))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        );

    // The test surface only exists in development deployments.
    if state.config.mode.is_development() {
        v1_routes = v1_routes
            .route("/e2e/auth/login", post(e2e::test_login))
            .route("/e2e/reset", post(e2e::reset_state));
    }

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .nest("/api/v1", v1_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::exchange_google_token,
        auth::me,
        todos::list_todos,
        todos::get_todo,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Todo,
            CreateTodoRequest,
            UpdateTodoRequest,
            ExchangeTokenRequest,
            ExchangeTokenResponse,
            UserSummary,
            MeResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Google ID token exchange and session identity"),
        (name = "Todos", description = "Todo management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
