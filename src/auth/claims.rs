// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Claim sets flowing through the auth pipeline.
//!
//! [`IdentityClaims`] come out of Google ID token verification, are consumed
//! once to mint a session token, and are never persisted.
//! [`SessionClaims`] is the exact payload of an app-issued session JWT.
//! [`AuthenticatedUser`] is what handlers see after the guard has run.

use serde::{Deserialize, Serialize};

/// Verified identity facts extracted from a Google ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Stable opaque identifier from the provider (`sub`). Never empty.
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

/// Payload of an app-issued session token.
///
/// The token is self-contained: validity is decided purely by signature and
/// these embedded timestamps, never by server-side state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject carried over from the identity provider.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iss: String,
    pub aud: String,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Not-before (Unix seconds).
    pub nbf: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
}

/// Authenticated identity exposed to request handlers by the `Auth`
/// extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Token expiry (Unix seconds), available for logging.
    pub expires_at: i64,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
            expires_at: claims.exp,
        }
    }
}
