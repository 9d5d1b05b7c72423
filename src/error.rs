// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for xcserve

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XcserveError {
    #[error("Xcode not found. Please install Xcode and run xcode-select.")]
    XcodeNotFound,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Tool '{tool}' not found on this host: {detail}")]
    ToolNotFound { tool: String, detail: String },

    #[error("{0}. Run the list_schemes tool to see valid schemes and configurations.")]
    SchemeOrConfiguration(String),

    #[error("Command timed out after {0} seconds")]
    Timeout(u64),

    #[error("Command output exceeded the {limit_mb} MB capture limit")]
    OutputLimitExceeded { limit_mb: u64 },

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Simulator not found: {0}")]
    SimulatorNotFound(String),

    #[error("Simulator error: {0}")]
    SimulatorError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl XcserveError {
    /// Stable machine-readable code carried in protocol error responses.
    pub fn code(&self) -> &'static str {
        match self {
            XcserveError::XcodeNotFound => "xcode_not_found",
            XcserveError::Validation(_) => "invalid_request",
            XcserveError::ProjectNotFound(_) => "project_not_found",
            XcserveError::ToolNotFound { .. } => "tool_not_found",
            XcserveError::SchemeOrConfiguration(_) => "scheme_or_configuration",
            XcserveError::Timeout(_) => "timeout",
            XcserveError::OutputLimitExceeded { .. } => "output_limit_exceeded",
            XcserveError::CommandFailed(_) => "command_failed",
            XcserveError::SimulatorNotFound(_) => "simulator_not_found",
            XcserveError::SimulatorError(_) => "simulator_error",
            XcserveError::Internal(_) => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, XcserveError>;
