// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Application state for xcserve
//!
//! Read-only after startup; tool calls keep no state between invocations.

use crate::config::Config;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub xcode_version: String,
}

impl AppState {
    pub fn new(config: Config, xcode_version: String) -> Self {
        Self {
            config,
            xcode_version,
        }
    }
}

pub type SharedState = Arc<AppState>;
