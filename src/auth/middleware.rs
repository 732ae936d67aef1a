// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate for Axum.
//!
//! Layer [`require_auth`] over a router subtree to protect every route in it:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/users/me", get(users::get_current_user))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_auth,
//!     ));
//! ```
//!
//! Requests without a valid access token are answered with
//! `401 {"error":"Unauthorized"}` and never reach the handler. On success the
//! caller's [`Principal`] is stored in the request extensions.
//!
//! The gate only establishes who the caller is. Whether that caller may touch
//! a particular post or template is decided by the handler.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, Principal, TokenKind, TokenVerifier};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MissingCredential)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::MissingCredential)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// Verify the request's access token and build the principal.
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Principal, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verifier.verify(TokenKind::Access, token)?;
    Ok(Principal::from(claims))
}

/// Gate middleware.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.verifier) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, ManualClock};
    use crate::config::AuthConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{self, StatusCode},
        routing::get,
        Extension, Json, Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    const NOW: i64 = 1_700_000_000;

    #[derive(Default)]
    struct Calls {
        count: AtomicUsize,
        seen: Mutex<Vec<Principal>>,
    }

    fn setup() -> (AppState, Arc<ManualClock>, Arc<Calls>, Router) {
        let config = AuthConfig::new("access-secret", "refresh-secret").unwrap();
        let clock = Arc::new(ManualClock::new(NOW));
        let state = AppState::with_clock(config, clock.clone());
        let calls = Arc::new(Calls::default());

        // The handler reads only what the gate stored; it never verifies.
        let recorder = calls.clone();
        let app = Router::new()
            .route(
                "/protected",
                get(move |Extension(principal): Extension<Principal>| {
                    let recorder = recorder.clone();
                    async move {
                        recorder.count.fetch_add(1, Ordering::SeqCst);
                        recorder.seen.lock().unwrap().push(principal.clone());
                        Json(principal)
                    }
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            ))
            .with_state(state.clone());

        (state, clock, calls, app)
    }

    fn request(auth: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn assert_unauthorized(response: Response) {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Unauthorized"}"#);
    }

    #[tokio::test]
    async fn missing_header_never_calls_handler() {
        let (_, _, calls, app) = setup();

        let response = app.oneshot(request(None)).await.unwrap();

        assert_unauthorized(response).await;
        assert_eq!(calls.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_token_calls_handler_once_with_principal() {
        let (state, _, calls, app) = setup();
        let token = state
            .issuer
            .issue(TokenKind::Access, &Claims::new(1, "a@b.com", "user"))
            .unwrap();

        let response = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "email": "a@b.com", "role": "user"})
        );

        assert_eq!(calls.count.load(Ordering::SeqCst), 1);
        assert_eq!(
            calls.seen.lock().unwrap().as_slice(),
            &[Principal {
                id: 1,
                email: "a@b.com".into(),
                role: "user".into(),
            }]
        );
    }

    #[tokio::test]
    async fn every_verifier_failure_looks_the_same() {
        let (state, clock, calls, app) = setup();
        let claims = Claims::new(1, "a@b.com", "user");
        let refresh = state.issuer.issue(TokenKind::Refresh, &claims).unwrap();
        let expired = state.issuer.issue(TokenKind::Access, &claims).unwrap();
        clock.advance(Duration::from_secs(16 * 60));

        for header in [
            "Bearer not-a-jwt".to_string(),
            format!("Bearer {refresh}"),
            format!("Bearer {expired}"),
            "Basic dXNlcjpwYXNz".to_string(),
            "Bearer ".to_string(),
        ] {
            let response = app.clone().oneshot(request(Some(&header))).await.unwrap();
            assert_unauthorized(response).await;
        }
        assert_eq!(calls.count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn bearer_token_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer   abc.def.ghi ".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn non_bearer_scheme_is_missing_credential() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Token abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingCredential));
    }

    #[test]
    fn authenticate_keeps_verifier_distinction() {
        let (state, clock, _, _) = setup();
        let token = state
            .issuer
            .issue(TokenKind::Access, &Claims::new(1, "a@b.com", "user"))
            .unwrap();
        clock.advance(Duration::from_secs(15 * 60));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());

        assert_eq!(
            authenticate(&headers, &state.verifier),
            Err(AuthError::Expired)
        );
    }
}
