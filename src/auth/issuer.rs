// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance.
//!
//! Access and refresh tokens are HS256 JWTs with the same body shape
//! ([`TokenClaims`]). They differ only in signing secret and lifetime, both
//! selected by [`TokenKind`].

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use utoipa::ToSchema;

use super::claims::{Claims, TokenClaims};
use super::clock::Clock;
use super::error::AuthError;
use crate::config::AuthConfig;

/// The only algorithm we sign or accept.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token class. Each class has its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived credential for API calls
    Access,
    /// Long-lived credential for minting new access tokens
    Refresh,
}

impl TokenKind {
    pub fn ttl(&self, config: &AuthConfig) -> Duration {
        match self {
            TokenKind::Access => config.access_ttl(),
            TokenKind::Refresh => config.refresh_ttl(),
        }
    }
}

/// Access and refresh token minted together at login.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs claims into tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        let access_key = EncodingKey::from_secret(config.access_secret());
        let refresh_key = EncodingKey::from_secret(config.refresh_secret());
        Self {
            config,
            clock,
            access_key,
            refresh_key,
        }
    }

    /// Sign `claims` as a token of the given kind, valid from now.
    pub fn issue(&self, kind: TokenKind, claims: &Claims) -> Result<String, AuthError> {
        self.issue_at(kind, claims, self.clock.now())
    }

    /// Issue both tokens for the same claims at the same instant.
    pub fn issue_pair(&self, claims: &Claims) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();
        Ok(TokenPair {
            access_token: self.issue_at(TokenKind::Access, claims, now)?,
            refresh_token: self.issue_at(TokenKind::Refresh, claims, now)?,
        })
    }

    fn issue_at(&self, kind: TokenKind, claims: &Claims, now: i64) -> Result<String, AuthError> {
        let ttl = i64::try_from(kind.ttl(&self.config).as_secs()).unwrap_or(i64::MAX);
        let body = TokenClaims::new(claims, now, now.saturating_add(ttl));

        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        encode(&Header::new(TOKEN_ALGORITHM), &body, key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
