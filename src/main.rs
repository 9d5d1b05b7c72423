// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! xcserve entrypoint

use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xcserve::config::Config;
use xcserve::state::AppState;
use xcserve::{server, xcode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries protocol frames; diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.to_string())),
        )
        .init();

    let xcode_version = match xcode::xcodebuild::get_xcode_version().await {
        Ok(version) => {
            info!("Xcode version: {}", version);
            version
        }
        Err(e) => {
            tracing::error!("Xcode not found or not working: {}", e);
            tracing::error!("xcserve requires Xcode to be installed and configured");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(config, xcode_version));

    server::run(state).await
}
