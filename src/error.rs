// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

// Keeps the auth layer's uniform wire message; the variant itself is dropped.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();
        Self::new(status, status.canonical_reason().unwrap_or("Unauthorized"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let teapot = ApiError::new(StatusCode::IM_A_TEAPOT, "short and stout");
        assert_eq!(teapot.status, StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn auth_errors_collapse_to_reason_phrase() {
        let expired = ApiError::from(AuthError::Expired);
        assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired.message, "Unauthorized");

        let forged = ApiError::from(AuthError::InvalidSignature);
        assert_eq!(forged.message, expired.message);

        let signing = ApiError::from(AuthError::Signing("boom".into()));
        assert_eq!(signing.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(signing.message, "Internal Server Error");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
