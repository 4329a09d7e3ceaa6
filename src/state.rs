// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{GoogleIdTokenVerifier, SessionTokenService};
use crate::config::AppConfig;
use crate::store::TodoStore;

/// Shared application state. Every handler receives its collaborators
/// through here — no ambient globals, no service locator.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub sessions: Arc<SessionTokenService>,
    pub google: Arc<GoogleIdTokenVerifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: TodoStore,
        sessions: SessionTokenService,
        google: GoogleIdTokenVerifier,
        config: AppConfig,
    ) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(sessions),
            google: Arc::new(google),
            config: Arc::new(config),
        }
    }
}
