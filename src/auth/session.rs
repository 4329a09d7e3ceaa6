// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification.
//!
//! After a successful Google exchange the service mints its own HS256
//! token; every protected request presents it as a bearer credential. The
//! token is stateless — no revocation list, no refresh. Once issued it is
//! valid until expiry unless the signing key is rotated.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{IdentityClaims, SessionClaims};
use super::error::{map_jwt_error, AuthError};
use crate::config::SessionConfig;

/// Clock skew tolerance in seconds, applied to `exp` and `nbf`.
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Issues and verifies app-signed session tokens with a shared symmetric
/// key. One instance lives in `AppState` and serves both roles.
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl SessionTokenService {
    /// Build from validated configuration. The config loader has already
    /// rejected empty, short, and placeholder keys; the emptiness check
    /// here guards construction paths that bypass `AppConfig::from_env`.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AuthError> {
        if config.signing_key.trim().is_empty() {
            return Err(AuthError::Misconfigured(
                "SESSION_SIGNING_KEY is not configured.".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.signing_key.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            lifetime: Duration::minutes(config.lifetime_minutes),
        })
    }

    /// Mint a session token for a verified identity.
    ///
    /// Returns the encoded token and its absolute expiry; the caller
    /// transmits both to the client.
    pub fn issue(&self, identity: &IdentityClaims) -> Result<(String, DateTime<Utc>), AuthError> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;

        let claims = SessionClaims {
            sub: identity.subject.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(format!("Failed to sign session token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Verify an inbound session token: signature, issuer, audience,
    /// not-before, and expiry, with clock-skew leeway.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(map_jwt_error)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const TEST_SIGNING_KEY: &str = "test-session-signing-key-0123456789abcdef";

    pub fn test_session_config() -> SessionConfig {
        SessionConfig {
            signing_key: TEST_SIGNING_KEY.to_string(),
            issuer: "todo-api-tests".to_string(),
            audience: "todo-api-tests".to_string(),
            lifetime_minutes: 60,
        }
    }

    pub fn test_service() -> SessionTokenService {
        SessionTokenService::from_config(&test_session_config()).expect("valid test config")
    }

    /// Encode arbitrary claims with the test signing key, bypassing
    /// `issue()` so tests can fabricate timestamps.
    pub fn encode_claims(claims: &SessionClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(TEST_SIGNING_KEY.as_bytes()),
        )
        .expect("claims encode")
    }
}
