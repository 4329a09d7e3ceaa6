// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Two token types flow through this module:
//!
//! 1. **Google ID tokens** — short-lived credentials the frontend obtains
//!    from Google Sign-In. `POST /auth/google` hands one to
//!    [`GoogleIdTokenVerifier`], which checks signature (via Google's
//!    JWKS), audience, issuer, and expiry.
//! 2. **Session tokens** — app-issued HS256 JWTs minted by
//!    [`SessionTokenService`] from the verified identity claims. Every
//!    protected request presents one as `Authorization: Bearer <token>`;
//!    the [`Auth`] extractor validates it before the handler runs.
//!
//! ## Security
//!
//! - Sessions are stateless: signature + embedded timestamps decide
//!   validity, nothing server-side
//! - JWKS is fetched over HTTPS only and cached with a TTL
//! - Clock skew tolerance is 60 seconds on both token types
//! - The signing secret is validated at startup (length, placeholder)

pub mod claims;
pub mod error;
pub mod extractor;
pub mod google;
pub mod jwks;
pub mod session;

pub use claims::{AuthenticatedUser, IdentityClaims, SessionClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use google::GoogleIdTokenVerifier;
pub use jwks::JwksManager;
pub use session::SessionTokenService;
