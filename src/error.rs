// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Handler-level error carrying an HTTP status and an optional JSON body.
///
/// Three body shapes exist on the wire:
/// - `{"error": "..."}` for plain failures and operator-facing
///   misconfiguration messages
/// - `{"error": "...", "detail": "..."}` for development-mode auth failures
/// - `{"errors": {"field": ["..."]}}` for domain validation failures
///
/// `NotFound` and production-mode `Unauthorized` deliberately carry no body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Option<ErrorBody>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message {
        error: String,
    },
    Detailed {
        error: String,
        detail: String,
    },
    Validation {
        errors: HashMap<String, Vec<String>>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: Some(ErrorBody::Message {
                error: message.into(),
            }),
        }
    }

    /// Field-level validation failure: `{"errors": {field: [message]}}`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.into(), vec![message.into()]);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: Some(ErrorBody::Validation { errors }),
        }
    }

    /// 404 with an empty body.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: None,
        }
    }

    /// 401 with an empty body (production visibility).
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: None,
        }
    }

    /// 401 with a failure reason (development visibility only).
    pub fn unauthorized_detailed(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: Some(ErrorBody::Detailed {
                error: message.into(),
                detail: detail.into(),
            }),
        }
    }

    /// 500 with an operator-facing message. Safe to expose: it describes a
    /// configuration fact, never user data.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Some(ErrorBody::Message {
                error: message.into(),
            }),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Some(ErrorBody::Message {
                error: message.into(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::NotFound(_) => ApiError::not_found(),
            other => {
                tracing::error!(error = %other, "todo store operation failed");
                ApiError::internal("Internal storage error")
            }
        }
    }
}
