// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the authenticated principal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Identity payload embedded in every token.
///
/// This is exactly what crosses the wire: `{id, email, role}`. Anything else
/// found in a decoded token is dropped when converting back to `Claims`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub id: i64,
    /// User email
    pub email: String,
    /// Role name (e.g. `user`, `admin`)
    pub role: String,
}

impl Claims {
    pub fn new(id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Full JWT body: identity claims plus the registered temporal claims.
///
/// Fields are listed explicitly instead of flattening [`Claims`] so that
/// unknown keys in a decoded payload are ignored rather than captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub email: String,
    pub role: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(claims: &Claims, iat: i64, exp: i64) -> Self {
        Self {
            id: claims.id,
            email: claims.email.clone(),
            role: claims.role.clone(),
            iat,
            exp,
        }
    }

    /// Project back down to the identity fields.
    pub fn identity(&self) -> Claims {
        Claims {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Verified caller identity for the current request.
///
/// The gate inserts this into request extensions; handlers read it through
/// the [`Auth`](super::Auth) extractor. It is never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl Principal {
    /// Parsed role, if it is one we know about.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Ownership check used by resource handlers: the owner or an admin.
    pub fn can_act_on(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        }
    }
}
