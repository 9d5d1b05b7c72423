// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration module for xcserve

use clap::Parser;
use std::path::{Path, PathBuf};

/// Stdio tool-dispatch server for Xcode build, test and simulator operations
#[derive(Parser, Debug, Clone)]
#[command(name = "xcserve")]
#[command(version)]
#[command(about = "Stdio tool-dispatch server for Xcode operations", long_about = None)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", env = "XCSERVE_LOG_LEVEL")]
    pub log_level: String,

    /// Wall-clock timeout for build/test subprocesses, in seconds
    #[arg(long, default_value = "600", env = "XCSERVE_COMMAND_TIMEOUT")]
    pub command_timeout_secs: u64,

    /// Maximum captured subprocess output, in megabytes
    #[arg(long, default_value = "16", env = "XCSERVE_OUTPUT_LIMIT_MB")]
    pub output_limit_mb: u64,

    /// Directory for persisted build/test logs and debug snapshots
    #[arg(long, default_value = "/tmp/xcserve-logs", env = "XCSERVE_LOG_DIR")]
    pub log_dir: PathBuf,

    /// Base directory for derived data when a request does not specify one
    #[arg(long, env = "XCSERVE_DERIVED_DATA_BASE")]
    pub derived_data_base: Option<PathBuf>,
}

impl Config {
    /// Default derived-data path for a project that did not specify one.
    ///
    /// Each project gets its own subtree under the configured base, keyed by
    /// the project file stem, so concurrent projects never share intermediates.
    pub fn derived_data_for(&self, project_path: &Path) -> PathBuf {
        let stem = project_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Default".to_string());

        let base = self
            .derived_data_base
            .clone()
            .unwrap_or_else(|| PathBuf::from("/tmp/xcserve-derived-data"));

        base.join(stem)
    }

    /// Output capture ceiling in bytes.
    pub fn output_limit_bytes(&self) -> usize {
        (self.output_limit_mb as usize) * 1024 * 1024
    }
}
