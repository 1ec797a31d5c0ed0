// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{chain::ChainGateway, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chain: Arc<dyn ChainGateway>,
}

impl AppState {
    pub fn new(config: AppConfig, chain: Arc<dyn ChainGateway>) -> Self {
        Self {
            config: Arc::new(config),
            chain,
        }
    }
}
