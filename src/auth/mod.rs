// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless dual-token authentication for the Inkwell API.
//!
//! ## Auth Flow
//!
//! 1. Login (outside this crate) checks credentials and calls
//!    [`TokenIssuer::issue_pair`] to mint an access and a refresh token
//! 2. Client sends `Authorization: Bearer <access token>`
//! 3. The gate ([`require_auth`]) verifies signature and expiry and stores a
//!    [`Principal`] in the request extensions
//! 4. When the access token expires, the client posts its refresh token to
//!    `/v1/auth/refresh` and gets a new access token ([`RefreshExchanger`])
//!
//! ## Security
//!
//! - Access and refresh tokens are signed with different secrets; neither
//!   class verifies as the other
//! - Tokens are HS256 JWTs; other algorithms are rejected
//! - No server-side session state: validity is signature + expiry only
//! - Every credential failure is a plain 401 on the wire

pub mod claims;
pub mod clock;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod middleware;
pub mod refresh;
pub mod roles;
pub mod verifier;

pub use claims::{Claims, Principal, TokenClaims};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use issuer::{TokenIssuer, TokenKind, TokenPair};
pub use middleware::require_auth;
pub use refresh::RefreshExchanger;
pub use roles::Role;
pub use verifier::TokenVerifier;
