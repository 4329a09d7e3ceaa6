// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Todo API - Google Sign-In Todo Service
//!
//! This crate provides a small login-then-CRUD backend: clients exchange a
//! Google-issued ID token for a locally signed session token, then manage a
//! shared todo list guarded by that token.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Google ID token verification and session tokens
//! - `store` - Persistent todo storage (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
