// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Scheme listing handler

use crate::error::Result;
use crate::models::{ListSchemesRequest, SchemeListResponse};
use crate::xcode::command::validate_project_path;
use crate::xcode::xcodebuild;

/// Handle a `list_schemes` tool call.
pub async fn list_schemes(req: ListSchemesRequest) -> Result<String> {
    let kind = validate_project_path(&req.project_path)?;
    let list = xcodebuild::list_schemes(&req.project_path, kind).await?;

    let response = SchemeListResponse {
        name: list.name,
        schemes: list.schemes,
        configurations: list.configurations,
    };
    Ok(response.render())
}
