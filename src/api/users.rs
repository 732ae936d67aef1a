// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, Principal};

/// Response for GET /v1/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// User ID
    pub id: i64,
    /// User email
    pub email: String,
    /// Role name
    pub role: String,
}

impl From<Principal> for UserMeResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email,
            role: principal.role,
        }
    }
}

/// Get the current authenticated user's identity.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserMeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(Auth(principal): Auth) -> Json<UserMeResponse> {
    Json(principal.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;

    #[test]
    fn user_me_response_from_principal() {
        let principal = Principal::from(Claims::new(3, "me@b.com", "admin"));

        let response: UserMeResponse = principal.into();
        assert_eq!(response.id, 3);
        assert_eq!(response.email, "me@b.com");
        assert_eq!(response.role, "admin");
    }
}
