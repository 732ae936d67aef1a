// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Authentication error type.
///
/// The verifier keeps `Malformed`, `InvalidSignature` and `Expired` apart so
/// in-process callers can tell "log in again" from "refresh". On the wire
/// every credential failure renders the same 401 body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token in the request
    #[error("Authorization header with a bearer token is required")]
    MissingCredential,
    /// Token could not be parsed
    #[error("Token is malformed")]
    Malformed,
    /// Signature does not match the secret for this token class
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Token is past its expiry
    #[error("Token has expired")]
    Expired,
    /// Authenticated, but not allowed to do this
    #[error("Insufficient permissions for this operation")]
    InsufficientPermissions,
    /// Token could not be signed
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Stable identifier, for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::Malformed => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::Signing(_) => "signing_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::Malformed
            | AuthError::InvalidSignature
            | AuthError::Expired => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Only the canonical reason phrase goes out; the variant stays server-side.
        let body = Json(AuthErrorBody {
            error: status.canonical_reason().unwrap_or("Unauthorized"),
        });
        (status, body).into_response()
    }
}
