// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token refresh endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /v1/auth/refresh
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token issued at login
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Response for POST /v1/auth/refresh
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Newly signed access token
    pub access_token: String,
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token is not rotated and stays valid until its own expiry.
#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    tag = "Auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 400, description = "Missing refreshToken"),
        (status = 401, description = "Refresh token invalid or expired"),
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let Json(request) = payload?;

    let refresh_token = request
        .refresh_token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("refreshToken is required"))?;

    let access_token = state.refresher.refresh(&refresh_token).map_err(|e| {
        tracing::info!(reason = e.error_code(), "Refresh token rejected");
        ApiError::from(e)
    })?;

    Ok(Json(RefreshResponse { access_token }))
}
