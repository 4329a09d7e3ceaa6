// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end test surface, mounted only in development mode.
//!
//! `POST /api/v1/e2e/auth/login` mints a real session token without a Google
//! ID token so browser tests can authenticate without the OAuth dance.
//! `POST /api/v1/e2e/reset` wipes the todo table between test runs. The
//! router never mounts these routes in production.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    api::auth::issue_session,
    auth::IdentityClaims,
    error::ApiError,
    models::ExchangeTokenResponse,
    state::AppState,
};

const DEFAULT_SUBJECT: &str = "e2e-subject";
const DEFAULT_EMAIL: &str = "e2e@example.com";
const DEFAULT_NAME: &str = "E2E User";

/// Optional identity overrides for a test login. Every field falls back to a
/// fixed default, so an empty (or absent) body is a valid request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TestLoginRequest {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/e2e/auth/login",
    request_body = TestLoginRequest,
    tag = "E2E",
    responses((status = 200, body = ExchangeTokenResponse))
)]
pub async fn test_login(
    State(state): State<AppState>,
    body: Option<Json<TestLoginRequest>>,
) -> Result<Json<ExchangeTokenResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let identity = IdentityClaims {
        subject: or_default(request.subject, DEFAULT_SUBJECT),
        email: Some(or_default(request.email, DEFAULT_EMAIL)),
        name: Some(or_default(request.name, DEFAULT_NAME)),
        picture_url: None,
    };

    tracing::info!(subject = %identity.subject, "e2e test login");
    issue_session(&state, identity)
}

#[utoipa::path(
    post,
    path = "/api/v1/e2e/reset",
    tag = "E2E",
    responses((status = 204, description = "All todos removed"))
)]
pub async fn reset_state(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store.clear()?;
    tracing::info!("e2e state reset");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn login_without_body_uses_defaults() {
        let (state, _dir) = test_state(DeploymentMode::Development);

        let Json(response) = test_login(State(state.clone()), None)
            .await
            .expect("login succeeds");

        assert_eq!(response.user.subject, "e2e-subject");
        assert_eq!(response.user.email.as_deref(), Some("e2e@example.com"));
        assert_eq!(response.user.name.as_deref(), Some("E2E User"));

        let claims = state
            .sessions
            .verify(&response.access_token)
            .expect("token verifies");
        assert_eq!(claims.sub, "e2e-subject");
    }

    #[tokio::test]
    async fn login_honors_overrides_and_ignores_blanks() {
        let (state, _dir) = test_state(DeploymentMode::Development);

        let request = TestLoginRequest {
            subject: Some(" custom-subject ".to_string()),
            email: Some("   ".to_string()),
            name: None,
        };
        let Json(response) = test_login(State(state), Some(Json(request)))
            .await
            .expect("login succeeds");

        assert_eq!(response.user.subject, "custom-subject");
        assert_eq!(response.user.email.as_deref(), Some("e2e@example.com"));
        assert_eq!(response.user.name.as_deref(), Some("E2E User"));
    }

    #[tokio::test]
    async fn reset_clears_all_todos() {
        let (state, _dir) = test_state(DeploymentMode::Development);
        state.store.create("one").unwrap();
        state.store.create("two").unwrap();

        let status = reset_state(State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.list().unwrap().is_empty());
    }
}
