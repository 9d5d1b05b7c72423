// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Stdio dispatch loop
//!
//! Newline-delimited JSON: one request object per line on stdin, one response
//! per line on stdout. The tool set is a closed enum, so an unknown tool name
//! is a deserialization error and adding a tool is a compile-time-checked
//! change. One call is handled to completion before the next line is read;
//! tool calls share no mutable state, so a failing build cannot affect the
//! next call.

use crate::error::{Result, XcserveError};
use crate::handlers;
use crate::models::{
    BootSimulatorRequest, BuildRequest, InstallAppRequest, ListSchemesRequest,
    ListSimulatorsRequest, ScreenshotRequest, ShutdownSimulatorRequest, SimulatorLogsRequest,
    SwiftPackageRequest, TestRequest, UninstallAppRequest,
};
use crate::state::SharedState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// One framed request.
#[derive(Debug, Deserialize)]
struct ToolRequest {
    #[serde(default)]
    id: Value,
    #[serde(flatten)]
    call: ToolCall,
}

/// Every tool the server exposes. Dispatch is an exhaustive match below.
#[derive(Debug, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
enum ToolCall {
    Build(BuildRequest),
    Test(TestRequest),
    SwiftPackage(SwiftPackageRequest),
    ListSchemes(ListSchemesRequest),
    ListSimulators(ListSimulatorsRequest),
    BootSimulator(BootSimulatorRequest),
    ShutdownSimulator(ShutdownSimulatorRequest),
    InstallApp(InstallAppRequest),
    UninstallApp(UninstallAppRequest),
    Screenshot(ScreenshotRequest),
    SimulatorLogs(SimulatorLogsRequest),
    Status,
}

#[derive(Debug, Serialize)]
struct ToolResponse {
    id: Value,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl ToolResponse {
    fn success(id: Value, content: String) -> Self {
        Self {
            id,
            ok: true,
            content: Some(content),
            error: None,
        }
    }

    fn failure(id: Value, error: &XcserveError) -> Self {
        Self {
            id,
            ok: false,
            content: None,
            error: Some(ErrorBody {
                code: error.code().to_string(),
                message: error.to_string(),
            }),
        }
    }
}

/// Handle one raw request line and produce the serialized response line.
///
/// Malformed input yields an error response with a null id; nothing here can
/// terminate the loop.
pub async fn handle_line(state: &SharedState, line: &str) -> String {
    let response = match serde_json::from_str::<ToolRequest>(line) {
        Ok(request) => {
            let id = request.id.clone();
            match dispatch(state, request.call).await {
                Ok(content) => ToolResponse::success(id, content),
                Err(e) => {
                    tracing::warn!("tool call failed: {}", e);
                    ToolResponse::failure(id, &e)
                }
            }
        }
        Err(e) => ToolResponse::failure(
            Value::Null,
            &XcserveError::Validation(format!("malformed request: {}", e)),
        ),
    };

    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"id":null,"ok":false,"error":{{"code":"internal_error","message":"{}"}}}}"#, e))
}

async fn dispatch(state: &SharedState, call: ToolCall) -> Result<String> {
    match call {
        ToolCall::Build(req) => handlers::build::build(state, req).await,
        ToolCall::Test(req) => handlers::test::test(state, req).await,
        ToolCall::SwiftPackage(req) => handlers::swift::swift_package(state, req).await,
        ToolCall::ListSchemes(req) => handlers::listing::list_schemes(req).await,
        ToolCall::ListSimulators(req) => handlers::simulator::list(req).await,
        ToolCall::BootSimulator(req) => handlers::simulator::boot(req).await,
        ToolCall::ShutdownSimulator(req) => handlers::simulator::shutdown(req).await,
        ToolCall::InstallApp(req) => handlers::simulator::install(req).await,
        ToolCall::UninstallApp(req) => handlers::simulator::uninstall(req).await,
        ToolCall::Screenshot(req) => handlers::simulator::screenshot(req).await,
        ToolCall::SimulatorLogs(req) => handlers::simulator::logs(req).await,
        ToolCall::Status => handlers::status::status(state).await,
    }
}

/// Run the dispatch loop over the process's stdin/stdout until EOF.
pub async fn run(state: SharedState) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    tracing::info!("xcserve ready, waiting for tool calls on stdin");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&state, &line).await;
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
