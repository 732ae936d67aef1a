// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::require_auth, state::AppState};

pub mod auth;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new().route("/auth/refresh", post(auth::refresh));

    // Everything in here sits behind the gate.
    let protected_routes = Router::new()
        .route("/users/me", get(users::get_current_user))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let v1_routes = public_routes.merge(protected_routes).with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::live))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::live,
        auth::refresh,
        users::get_current_user
    ),
    components(
        schemas(
            auth::RefreshRequest,
            auth::RefreshResponse,
            users::UserMeResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness checks"),
        (name = "Auth", description = "Token refresh"),
        (name = "Users", description = "Authenticated user identity")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(AuthConfig::new("access-secret", "refresh-secret").unwrap())
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn users_me_requires_token() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/users/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn openapi_lists_refresh_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/auth/refresh"));
        assert!(doc.paths.paths.contains_key("/v1/users/me"));
    }
}
