// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inkwell Auth - stateless access/refresh token authentication
//!
//! This crate mints and verifies the bearer credentials used by the Inkwell
//! blog API and gates protected routes behind a verified principal. Post,
//! tag and template handlers live elsewhere and consume the principal.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification, refresh and the request gate
//! - `config` - Environment-driven configuration
//! - `telemetry` - Logging setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
