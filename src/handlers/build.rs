// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Build orchestration
//!
//! Runs one build request end to end: validate, resolve the destination,
//! assemble the command, execute, parse, locate the artifact, persist logs.
//! Validation failures never reach a subprocess; non-zero exits flow through
//! parsing; only transport failures (timeout, missing tool) bypass it.

use crate::error::{Result, XcserveError};
use crate::logs;
use crate::models::{BuildRequest, BuildResponse};
use crate::state::SharedState;
use crate::xcode::command::{
    validate_project_path, validate_safe, Invocation, ProjectKind, XcodebuildParams,
};
use crate::xcode::destination::{self, Destination};
use crate::xcode::executor::ExecutionOutcome;
use crate::xcode::platform::PlatformInfo;
use crate::xcode::{arch, artifacts, executor, simctl};
use std::path::Path;
use std::time::Duration;

/// Handle a `build` tool call.
pub async fn build(state: &SharedState, req: BuildRequest) -> Result<String> {
    let prepared = prepare(state, &req).await?;
    let outcome = run(state, &prepared.invocation).await?;

    check_scheme_rejection(&outcome)?;

    let combined = combine(&outcome);
    let issues = crate::xcode::parser::parse_build_issues(outcome.exit_code, &combined);
    let success = outcome.exit_code == 0;

    let mut app_path = None;
    let mut notes = Vec::new();
    if success {
        if let Some(artifact) = artifacts::find_app(Path::new(&prepared.derived_data_path)) {
            if let Some(note) = artifacts::configuration_mismatch(&artifact, &req.configuration) {
                notes.push(note);
            }
            app_path = Some(artifact.path);
        }
    }

    let label = req.scheme.as_deref().unwrap_or("default");
    let log_path = logs::save_log(&state.config.log_dir, "build", label, &combined).await;
    logs::save_debug_data(
        &state.config.log_dir,
        "build-command",
        label,
        &prepared.invocation.display(),
    )
    .await;

    let response = BuildResponse {
        success,
        exit_code: outcome.exit_code,
        issues,
        app_path,
        log_path,
        notes,
    };
    Ok(response.render())
}

pub(crate) struct PreparedBuild {
    pub invocation: Invocation,
    pub derived_data_path: String,
    pub params: XcodebuildParams,
}

/// Validating → Resolving → Building-Command, shared with the test handler.
pub(crate) async fn prepare(state: &SharedState, req: &BuildRequest) -> Result<PreparedBuild> {
    let kind = validate_project_path(&req.project_path)?;
    if kind == ProjectKind::SwiftPackage {
        return Err(XcserveError::Validation(
            "Swift packages build through the swift_package tool".to_string(),
        ));
    }
    if let Some(scheme) = &req.scheme {
        validate_safe("scheme", scheme)?;
    }
    validate_safe("configuration", &req.configuration)?;
    if let Some(device_id) = &req.device_id {
        validate_safe("device_id", device_id)?;
    }
    if let Some(derived) = &req.derived_data_path {
        validate_safe("derived data path", derived)?;
    }
    let platform = PlatformInfo::parse(&req.platform)?;

    let resolved = resolve_destination(platform, req.device_id.as_deref(), req.universal).await?;

    let derived_data_path = match &req.derived_data_path {
        Some(path) => path.clone(),
        None => state
            .config
            .derived_data_for(Path::new(&req.project_path))
            .to_string_lossy()
            .into_owned(),
    };

    let params = XcodebuildParams {
        project_path: req.project_path.clone(),
        kind,
        scheme: req.scheme.clone(),
        configuration: req.configuration.clone(),
        destination_arg: resolved,
        derived_data_path: derived_data_path.clone(),
    };

    Ok(PreparedBuild {
        invocation: params.build_invocation(),
        derived_data_path,
        params,
    })
}

/// Resolve the destination descriptor into its xcodebuild string, booting the
/// simulator first for device-specific destinations and consulting the
/// architecture detector only for generic native builds.
async fn resolve_destination(
    platform: &'static PlatformInfo,
    device_id: Option<&str>,
    universal: bool,
) -> Result<String> {
    let dest = destination::resolve(platform, device_id, universal);

    if dest.is_device_specific() {
        let udid = simctl::ensure_booted(platform, device_id).await?;
        let booted = Destination::DeviceById(platform, udid);
        return Ok(booted.destination_arg(None));
    }

    let native_arch = if matches!(dest, Destination::NativePlatform(_)) {
        arch::native_arch().await
    } else {
        None
    };

    Ok(dest.destination_arg(native_arch.as_deref()))
}

pub(crate) async fn run(
    state: &SharedState,
    invocation: &Invocation,
) -> Result<ExecutionOutcome> {
    executor::execute(
        invocation,
        Duration::from_secs(state.config.command_timeout_secs),
        state.config.output_limit_bytes(),
    )
    .await
}

pub(crate) fn combine(outcome: &ExecutionOutcome) -> String {
    let mut combined = outcome.stdout.clone();
    combined.push_str(&outcome.stderr);
    combined
}

/// xcodebuild rejects unknown schemes and configurations with recognizable
/// phrasing on stderr; surface those as a dedicated error that points at the
/// list_schemes tool instead of a generic build failure.
pub(crate) fn check_scheme_rejection(outcome: &ExecutionOutcome) -> Result<()> {
    if outcome.exit_code == 0 {
        return Ok(());
    }
    for line in outcome.stderr.lines() {
        if line.contains("does not contain a scheme named")
            || line.contains("does not contain a configuration named")
            || (line.contains("Scheme") && line.contains("is not currently configured"))
        {
            return Err(XcserveError::SchemeOrConfiguration(
                line.trim().trim_start_matches("xcodebuild: error: ").to_string(),
            ));
        }
    }
    Ok(())
}
