// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the authenticated principal.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal is Principal
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::authenticate;
use super::{AuthError, Principal};
use crate::state::AppState;

/// Extractor for the verified caller.
///
/// Behind [`require_auth`](super::require_auth) this just reads the
/// principal the gate stored. On an ungated route it runs the same
/// verification itself, so a handler can never see an unverified caller.
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
            return Ok(Auth(principal));
        }

        let principal = authenticate(&parts.headers, &state.verifier)?;
        Ok(Auth(principal))
    }
}

/// Extractor that requires admin role.
pub struct AdminOnly(pub Principal);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(principal) = Auth::from_request_parts(parts, state).await?;

        if !principal.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, ManualClock, TokenKind};
    use crate::config::AuthConfig;
    use axum::http::{header::AUTHORIZATION, Request};
    use std::sync::Arc;

    fn create_test_state() -> AppState {
        let config = AuthConfig::new("access-secret", "refresh-secret").unwrap();
        AppState::with_clock(config, Arc::new(ManualClock::new(1_700_000_000)))
    }

    fn parts_with(auth: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = create_test_state();
        let mut parts = parts_with(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[tokio::test]
    async fn auth_extractor_verifies_token_without_gate() {
        let state = create_test_state();
        let token = state
            .issuer
            .issue(TokenKind::Access, &Claims::new(12, "x@y.com", "user"))
            .unwrap();
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let Auth(principal) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(principal.id, 12);
        assert_eq!(principal.email, "x@y.com");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_refresh_token() {
        let state = create_test_state();
        let token = state
            .issuer
            .issue(TokenKind::Refresh, &Claims::new(12, "x@y.com", "user"))
            .unwrap();
        let mut parts = parts_with(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = create_test_state();
        let mut parts = parts_with(None);
        parts
            .extensions
            .insert(Principal::from(Claims::new(4, "gate@b.com", "admin")));

        let Auth(principal) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(principal.email, "gate@b.com");
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admin() {
        let state = create_test_state();
        let mut parts = parts_with(None);
        parts
            .extensions
            .insert(Principal::from(Claims::new(4, "a@b.com", "user")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_accepts_admin() {
        let state = create_test_state();
        let mut parts = parts_with(None);
        parts
            .extensions
            .insert(Principal::from(Claims::new(1, "root@b.com", "admin")));

        let AdminOnly(principal) = AdminOnly::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(principal.id, 1);
    }
}
