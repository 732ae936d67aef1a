// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AuthConfig`] loaded from them. Configuration is read once at startup
//! and handed to the token issuer and verifier; nothing re-reads the
//! environment afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_ACCESS_SECRET` | HMAC secret for access tokens | Required |
//! | `JWT_REFRESH_SECRET` | HMAC secret for refresh tokens | Required |
//! | `ACCESS_TOKEN_TTL_SECS` | Access token lifetime in seconds | `900` |
//! | `REFRESH_TOKEN_TTL_SECS` | Refresh token lifetime in seconds | `604800` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the access token secret.
pub const ACCESS_SECRET_ENV: &str = "JWT_ACCESS_SECRET";

/// Environment variable holding the refresh token secret.
///
/// Must differ from [`ACCESS_SECRET_ENV`], otherwise a refresh token would
/// verify as an access token.
pub const REFRESH_SECRET_ENV: &str = "JWT_REFRESH_SECRET";

pub const ACCESS_TTL_ENV: &str = "ACCESS_TOKEN_TTL_SECS";
pub const REFRESH_TTL_ENV: &str = "REFRESH_TOKEN_TTL_SECS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Access tokens live for 15 minutes.
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);

/// Refresh tokens live for 7 days.
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Fatal configuration problems. Any of these must stop the process before
/// it binds a listener.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set or blank")]
    MissingSecret { var: &'static str },

    #[error("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must be different")]
    SharedSecret,

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTtl { var: &'static str, value: String },
}

/// Signing material and lifetimes for both token classes.
///
/// Can only be built through [`AuthConfig::new`] or the env loaders, all of
/// which reject blank or shared secrets.
#[derive(Clone)]
pub struct AuthConfig {
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthConfig {
    /// Create a configuration with the default lifetimes.
    pub fn new(
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if is_blank(&access_secret) {
            return Err(ConfigError::MissingSecret {
                var: ACCESS_SECRET_ENV,
            });
        }
        if is_blank(&refresh_secret) {
            return Err(ConfigError::MissingSecret {
                var: REFRESH_SECRET_ENV,
            });
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        })
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access = lookup(ACCESS_SECRET_ENV).unwrap_or_default();
        let refresh = lookup(REFRESH_SECRET_ENV).unwrap_or_default();

        let mut config = Self::new(access, refresh)?;

        if let Some(ttl) = parse_ttl(ACCESS_TTL_ENV, lookup(ACCESS_TTL_ENV))? {
            config.access_ttl = ttl;
        }
        if let Some(ttl) = parse_ttl(REFRESH_TTL_ENV, lookup(REFRESH_TTL_ENV))? {
            config.refresh_ttl = ttl;
        }

        Ok(config)
    }

    pub fn access_secret(&self) -> &[u8] {
        &self.access_secret
    }

    pub fn refresh_secret(&self) -> &[u8] {
        &self.refresh_secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

fn is_blank(secret: &[u8]) -> bool {
    secret.iter().all(u8::is_ascii_whitespace)
}

fn parse_ttl(var: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidTtl { var, value: raw }),
    }
}
