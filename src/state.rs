// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{Clock, RefreshExchanger, SystemClock, TokenIssuer, TokenVerifier};
use crate::config::AuthConfig;

/// Shared, read-only handler state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub refresher: Arc<RefreshExchanger>,
}

impl AppState {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);
        let issuer = Arc::new(TokenIssuer::new(config.clone(), clock.clone()));
        let verifier = Arc::new(TokenVerifier::new(&config, clock));
        let refresher = Arc::new(RefreshExchanger::new(issuer.clone(), verifier.clone()));

        Self {
            issuer,
            verifier,
            refresher,
        }
    }
}
