// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response types for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Wire names are camelCase (`idToken`, `isCompleted`,
//! `createdAtUtc`) to match the frontend contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::IdentityClaims;

// =============================================================================
// Todo Models
// =============================================================================

/// A todo item as stored and as returned by every todo endpoint.
///
/// `id` and `created_at_utc` are immutable after creation; `updated_at_utc`
/// is null until the first update and advances on every subsequent one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned identifier, unique and monotonically increasing.
    pub id: u64,
    /// Trimmed, never empty once stored.
    pub title: String,
    pub is_completed: bool,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

/// Request body for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
}

/// Request body for `PUT /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: String,
    pub is_completed: bool,
}

// =============================================================================
// Auth Models
// =============================================================================

/// Request body for `POST /auth/google`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeTokenRequest {
    /// Google-issued ID token obtained by the frontend.
    pub id_token: String,
}

/// Identity summary returned alongside a freshly minted session token.
///
/// Derived directly from the verified Google claims; any optional field may
/// be null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

impl From<IdentityClaims> for UserSummary {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            subject: claims.subject,
            email: claims.email,
            name: claims.name,
            picture_url: claims.picture_url,
        }
    }
}

/// Response body for `POST /auth/google`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeTokenResponse {
    /// App-issued session token; sent as `Authorization: Bearer` on every
    /// protected request.
    pub access_token: String,
    pub expires_at_utc: DateTime<Utc>,
    pub user: UserSummary,
}

/// Response body for `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}
