// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and
//! validated before the server binds. Invalid session-token settings are
//! fatal: a deployment with a placeholder or short signing key must not
//! come up at all.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `APP_ENV` | Deployment mode (`development` or `production`) | `production` |
//! | `DATABASE_PATH` | Path to the redb database file | `data/todos.redb` |
//! | `GOOGLE_CLIENT_ID` | Expected audience of Google ID tokens | Checked per request |
//! | `SESSION_SIGNING_KEY` | HS256 secret for session tokens (min 32 chars) | Required |
//! | `SESSION_ISSUER` | Session token `iss` claim | `todo-api` |
//! | `SESSION_AUDIENCE` | Session token `aud` claim | `todo-api` |
//! | `SESSION_TOKEN_MINUTES` | Session token lifetime (1-1440) | `60` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

/// Template default that must be replaced before deployment. Configuration
/// validation rejects any value still containing this sentinel.
pub const PLACEHOLDER_SENTINEL: &str = "REPLACE_ME";

/// Minimum length for the HS256 session signing key.
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// Inclusive bounds for the session token lifetime in minutes.
pub const TOKEN_LIFETIME_RANGE: std::ops::RangeInclusive<i64> = 1..=1440;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("{0} is still set to the placeholder value")]
    Placeholder(&'static str),

    #[error("SESSION_SIGNING_KEY must be at least {MIN_SIGNING_KEY_LEN} characters, got {0}")]
    SigningKeyTooShort(usize),

    #[error("SESSION_TOKEN_MINUTES must be between 1 and 1440, got {0}")]
    LifetimeOutOfRange(i64),

    #[error("{0} is not a valid value: {1}")]
    Invalid(&'static str, String),
}

/// Deployment mode, threaded explicitly through [`crate::state::AppState`].
///
/// Development mode enables detailed authentication error bodies, the
/// `/api/v1/e2e` test surface, and default seeding of the todo table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    Production,
}

impl DeploymentMode {
    pub fn is_development(self) -> bool {
        self == DeploymentMode::Development
    }

    /// Parse from an `APP_ENV`-style string. Anything that is not
    /// explicitly development is treated as production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => DeploymentMode::Development,
            _ => DeploymentMode::Production,
        }
    }
}

/// Session token settings shared by the issuer and the authenticator.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HS256 signing secret. Known only to this service.
    pub signing_key: String,
    /// `iss` claim written to and expected from session tokens.
    pub issuer: String,
    /// `aud` claim written to and expected from session tokens.
    pub audience: String,
    /// Token lifetime in minutes.
    pub lifetime_minutes: i64,
}

impl SessionConfig {
    /// Validate the signing key and lifetime. Called at startup; a failure
    /// here is a deployment misconfiguration and the process should exit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.signing_key.trim();
        if key.is_empty() {
            return Err(ConfigError::Missing("SESSION_SIGNING_KEY"));
        }
        if key.to_ascii_uppercase().contains(PLACEHOLDER_SENTINEL) {
            return Err(ConfigError::Placeholder("SESSION_SIGNING_KEY"));
        }
        if key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigError::SigningKeyTooShort(key.len()));
        }
        if !TOKEN_LIFETIME_RANGE.contains(&self.lifetime_minutes) {
            return Err(ConfigError::LifetimeOutOfRange(self.lifetime_minutes));
        }
        Ok(())
    }
}

/// Application configuration, loaded once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: DeploymentMode,
    pub database_path: PathBuf,
    /// Expected audience of inbound Google ID tokens. May be empty at
    /// startup; the exchange endpoint re-checks it per request so that a
    /// misconfigured deployment still serves health probes.
    pub google_client_id: String,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from the environment and validate it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::Invalid("PORT", port_raw.clone()))?;

        let minutes_raw = env::var("SESSION_TOKEN_MINUTES").unwrap_or_else(|_| "60".to_string());
        let lifetime_minutes: i64 = minutes_raw
            .parse()
            .map_err(|_| ConfigError::Invalid("SESSION_TOKEN_MINUTES", minutes_raw.clone()))?;

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            mode: DeploymentMode::parse(
                &env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            ),
            database_path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "data/todos.redb".to_string()),
            ),
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            session: SessionConfig {
                signing_key: env::var("SESSION_SIGNING_KEY").unwrap_or_default(),
                issuer: env::var("SESSION_ISSUER").unwrap_or_else(|_| "todo-api".to_string()),
                audience: env::var("SESSION_AUDIENCE").unwrap_or_else(|_| "todo-api".to_string()),
                lifetime_minutes,
            },
        };

        config.session.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_session() -> SessionConfig {
        SessionConfig {
            signing_key: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "todo-api".to_string(),
            audience: "todo-api".to_string(),
            lifetime_minutes: 60,
        }
    }

    #[test]
    fn valid_session_config_passes() {
        assert!(valid_session().validate().is_ok());
    }

    #[test]
    fn empty_signing_key_is_rejected() {
        let mut cfg = valid_session();
        cfg.signing_key = "   ".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Missing("SESSION_SIGNING_KEY"))
        ));
    }

    #[test]
    fn placeholder_signing_key_is_rejected() {
        let mut cfg = valid_session();
        cfg.signing_key = "replace_me_with_a_real_secret_0123456789".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Placeholder("SESSION_SIGNING_KEY"))
        ));
    }

    #[test]
    fn short_signing_key_is_rejected() {
        let mut cfg = valid_session();
        cfg.signing_key = "too-short".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SigningKeyTooShort(9))
        ));
    }

    #[test]
    fn lifetime_bounds_are_enforced() {
        for minutes in [0, -5, 1441] {
            let mut cfg = valid_session();
            cfg.lifetime_minutes = minutes;
            assert!(
                matches!(cfg.validate(), Err(ConfigError::LifetimeOutOfRange(m)) if m == minutes)
            );
        }

        for minutes in [1, 60, 1440] {
            let mut cfg = valid_session();
            cfg.lifetime_minutes = minutes;
            assert!(cfg.validate().is_ok());
        }
    }

    #[test]
    fn mode_parsing_defaults_to_production() {
        assert_eq!(
            DeploymentMode::parse("development"),
            DeploymentMode::Development
        );
        assert_eq!(DeploymentMode::parse("Dev"), DeploymentMode::Development);
        assert_eq!(
            DeploymentMode::parse("production"),
            DeploymentMode::Production
        );
        assert_eq!(DeploymentMode::parse("staging"), DeploymentMode::Production);
        assert_eq!(DeploymentMode::parse(""), DeploymentMode::Production);
    }
}
