// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification.
//!
//! Checks run in a fixed order: structure, signature against the secret of
//! the expected [`TokenKind`], then expiry against the injected clock. An
//! expired token is therefore only reported as [`AuthError::Expired`] when
//! its signature is good.

use std::sync::Arc;

use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};

use super::claims::{Claims, TokenClaims};
use super::clock::Clock;
use super::error::AuthError;
use super::issuer::{TokenKind, TOKEN_ALGORITHM};
use crate::config::AuthConfig;

/// Validates tokens for either class.
#[derive(Clone)]
pub struct TokenVerifier {
    clock: Arc<dyn Clock>,
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        // Pinned to HS256. Expiry is checked by hand against `clock`, so the
        // library's own wall-clock check is off; `exp` must still be present.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            clock,
            access_key: DecodingKey::from_secret(config.access_secret()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret()),
            validation,
        }
    }

    /// Verify a token of the given kind and return its identity claims.
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, AuthError> {
        self.verify_full(kind, token).map(|body| body.identity())
    }

    /// Like [`verify`](Self::verify), but keeps `iat`/`exp`.
    pub fn verify_full(&self, kind: TokenKind, token: &str) -> Result<TokenClaims, AuthError> {
        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        let body = decode::<TokenClaims>(token.trim(), key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            })?
            .claims;

        if body.exp <= self.clock.now() {
            return Err(AuthError::Expired);
        }

        Ok(body)
    }
}
