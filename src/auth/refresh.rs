// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Refresh exchange: a valid refresh token buys a new access token.
//!
//! The refresh token is never rotated; it stays usable until its own expiry.

use std::sync::Arc;

use super::error::AuthError;
use super::issuer::{TokenIssuer, TokenKind};
use super::verifier::TokenVerifier;

#[derive(Clone)]
pub struct RefreshExchanger {
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
}

impl RefreshExchanger {
    pub fn new(issuer: Arc<TokenIssuer>, verifier: Arc<TokenVerifier>) -> Self {
        Self { issuer, verifier }
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// Verifier errors are returned as-is so callers can still tell an
    /// expired refresh token from a forged one.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        // `verify` decodes into the identity fields only; anything else the
        // refresh token carried is already gone here.
        let claims = self.verifier.verify(TokenKind::Refresh, refresh_token)?;

        self.issuer.issue(TokenKind::Access, &claims)
    }
}
