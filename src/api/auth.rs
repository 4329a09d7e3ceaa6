// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication endpoints.
//!
//! `POST /api/v1/auth/google` exchanges a Google-issued ID token for a
//! locally signed session token. Google tokens are accepted only here; every
//! other guarded route takes the session token. In production the exchange
//! returns a bare 401 on verification failure; development mode includes the
//! failure reason in the body.

use axum::{extract::State, Json};

use crate::{
    auth::{Auth, AuthError, IdentityClaims},
    config::PLACEHOLDER_SENTINEL,
    error::ApiError,
    models::{ExchangeTokenRequest, ExchangeTokenResponse, MeResponse, UserSummary},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/v1/auth/google",
    request_body = ExchangeTokenRequest,
    tag = "Auth",
    responses(
        (status = 200, body = ExchangeTokenResponse),
        (status = 400, description = "Missing idToken"),
        (status = 401, description = "ID token rejected"),
        (status = 500, description = "GOOGLE_CLIENT_ID not configured")
    )
)]
pub async fn exchange_google_token(
    State(state): State<AppState>,
    Json(request): Json<ExchangeTokenRequest>,
) -> Result<Json<ExchangeTokenResponse>, ApiError> {
    let id_token = request.id_token.trim();
    if id_token.is_empty() {
        return Err(ApiError::bad_request("idToken is required"));
    }

    let client_id = state.config.google_client_id.trim();
    if client_id.is_empty() {
        return Err(ApiError::misconfigured("GOOGLE_CLIENT_ID is not configured."));
    }
    if client_id.to_ascii_uppercase().contains(PLACEHOLDER_SENTINEL) {
        return Err(ApiError::misconfigured(
            "GOOGLE_CLIENT_ID is still set to the placeholder value.",
        ));
    }

    let identity = match state.google.verify(id_token, client_id).await {
        Ok(identity) => identity,
        Err(AuthError::Misconfigured(message)) => return Err(ApiError::misconfigured(message)),
        Err(err) => {
            tracing::warn!(error_code = err.error_code(), "google id token rejected");
            return Err(if state.config.mode.is_development() {
                ApiError::unauthorized_detailed("Invalid Google ID token", err.to_string())
            } else {
                ApiError::unauthorized()
            });
        }
    };

    issue_session(&state, identity)
}

/// Mint a session token for a verified identity. Shared with the e2e login
/// surface so both produce the same response shape.
pub(crate) fn issue_session(
    state: &AppState,
    identity: IdentityClaims,
) -> Result<Json<ExchangeTokenResponse>, ApiError> {
    let (access_token, expires_at_utc) = state.sessions.issue(&identity).map_err(|err| {
        tracing::error!(error = %err, "session token issuance failed");
        ApiError::internal("Failed to issue session token")
    })?;

    tracing::info!(subject = %identity.subject, "session token issued");
    Ok(Json(ExchangeTokenResponse {
        access_token,
        expires_at_utc,
        user: UserSummary::from(identity),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses((status = 200, body = MeResponse), (status = 401))
)]
pub async fn me(Auth(user): Auth) -> Json<MeResponse> {
    Json(MeResponse {
        subject: user.subject,
        email: user.email,
        name: user.name,
    })
}
