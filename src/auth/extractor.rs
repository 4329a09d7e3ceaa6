// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor guarding protected routes.
//!
//! Use the `Auth` extractor in handlers to require a valid session token:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! On failure the request is rejected before the handler runs. The
//! rejection body carries `{error, error_code}` detail in development mode
//! and is empty in production, so validation internals never leak from a
//! production deployment.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{AuthenticatedUser, AuthError};
use crate::state::AppState;

/// Extractor for authenticated requests.
pub struct Auth(pub AuthenticatedUser);

/// Rejection produced by [`Auth`]. Wraps the underlying error together
/// with the visibility decision made from the deployment mode.
#[derive(Debug)]
pub struct AuthRejection {
    error: AuthError,
    verbose: bool,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if self.verbose {
            let body = Json(AuthErrorBody {
                error: self.error.to_string(),
                error_code: self.error.error_code(),
            });
            (status, body).into_response()
        } else {
            status.into_response()
        }
    }
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verbose = state.config.mode.is_development();
        let reject = |error: AuthError| AuthRejection { error, verbose };

        // A previous layer may already have authenticated the request.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| reject(AuthError::MissingAuthHeader))?
            .to_str()
            .map_err(|_| reject(AuthError::InvalidAuthHeader))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| reject(AuthError::InvalidAuthHeader))?;

        let claims = state.sessions.verify(token).map_err(reject)?;

        Ok(Auth(AuthenticatedUser::from(claims)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::IdentityClaims;
    use crate::auth::session::test_support::encode_claims;
    use crate::auth::SessionClaims;
    use crate::config::DeploymentMode;
    use crate::state::test_support::test_state;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(v) = value {
            builder = builder.header("Authorization", v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn identity() -> IdentityClaims {
        IdentityClaims {
            subject: "sub-extractor".to_string(),
            email: Some("x@example.com".to_string()),
            name: None,
            picture_url: None,
        }
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (state, _dir) = test_state(DeploymentMode::Development);
        let mut parts = parts_with_header(None);

        let err = Auth::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("rejected");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let (state, _dir) = test_state(DeploymentMode::Development);
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));

        assert!(Auth::from_request_parts(&mut parts, &state).await.is_err());
    }

    #[tokio::test]
    async fn valid_session_token_is_accepted() {
        let (state, _dir) = test_state(DeploymentMode::Production);
        let (token, _) = state.sessions.issue(&identity()).unwrap();
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.subject, "sub-extractor");
        assert_eq!(user.email.as_deref(), Some("x@example.com"));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (state, _dir) = test_state(DeploymentMode::Development);
        let now = chrono::Utc::now().timestamp();
        let token = encode_claims(&SessionClaims {
            sub: "sub".to_string(),
            email: None,
            name: None,
            iss: "todo-api-tests".to_string(),
            aud: "todo-api-tests".to_string(),
            iat: now - 7200,
            nbf: now - 7200,
            exp: now - 3600,
        });
        let mut parts = parts_with_header(Some(&format!("Bearer {token}")));

        let err = Auth::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("rejected");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Development mode includes the error code.
        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "token_expired");
    }

    #[tokio::test]
    async fn production_rejection_body_is_empty() {
        let (state, _dir) = test_state(DeploymentMode::Production);
        let mut parts = parts_with_header(Some("Bearer not-a-token"));

        let err = Auth::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("rejected");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body_bytes.is_empty());
    }

    #[tokio::test]
    async fn extension_set_by_earlier_layer_wins() {
        let (state, _dir) = test_state(DeploymentMode::Production);
        let mut parts = parts_with_header(None);
        parts.extensions.insert(AuthenticatedUser {
            subject: "from-layer".to_string(),
            email: None,
            name: None,
            expires_at: 0,
        });

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.subject, "from-layer");
    }
}
