// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Simulator lifecycle handlers
//!
//! Thin wrappers over the simctl collaborator; no build-core state involved.

use crate::error::{Result, XcserveError};
use crate::models::{
    BootSimulatorRequest, InstallAppRequest, ListSimulatorsRequest, ScreenshotRequest,
    ShutdownSimulatorRequest, SimulatorListResponse, SimulatorLogsRequest, UninstallAppRequest,
};
use crate::xcode::command::validate_safe;
use crate::xcode::platform::PlatformInfo;
use crate::xcode::simctl;

/// Handle a `list_simulators` tool call.
pub async fn list(req: ListSimulatorsRequest) -> Result<String> {
    let platform = match &req.platform {
        Some(alias) => Some(PlatformInfo::parse(alias)?),
        None => None,
    };
    let simulators = simctl::list_devices(platform).await?;
    Ok(SimulatorListResponse { simulators }.render())
}

/// Handle a `boot_simulator` tool call.
pub async fn boot(req: BootSimulatorRequest) -> Result<String> {
    let platform = PlatformInfo::parse(&req.platform)?;
    if !platform.requires_simulator {
        return Err(XcserveError::Validation(format!(
            "{} does not use a simulator",
            platform.name
        )));
    }
    if let Some(device_id) = &req.device_id {
        validate_safe("device_id", device_id)?;
    }
    let udid = simctl::ensure_booted(platform, req.device_id.as_deref()).await?;
    Ok(format!("✅ Simulator booted: {}\n", udid))
}

/// Handle a `shutdown_simulator` tool call.
pub async fn shutdown(req: ShutdownSimulatorRequest) -> Result<String> {
    validate_safe("udid", &req.udid)?;
    simctl::shutdown(&req.udid).await?;
    Ok(format!("✅ Simulator shut down: {}\n", req.udid))
}

/// Handle an `install_app` tool call.
pub async fn install(req: InstallAppRequest) -> Result<String> {
    validate_safe("app path", &req.app_path)?;
    let udid = resolve_udid(req.udid).await?;
    simctl::install(&udid, &req.app_path).await?;
    Ok(format!("✅ Installed {} on {}\n", req.app_path, udid))
}

/// Handle an `uninstall_app` tool call.
pub async fn uninstall(req: UninstallAppRequest) -> Result<String> {
    validate_safe("bundle id", &req.bundle_id)?;
    let udid = resolve_udid(req.udid).await?;
    simctl::uninstall(&udid, &req.bundle_id).await?;
    Ok(format!("✅ Uninstalled {} from {}\n", req.bundle_id, udid))
}

/// Handle a `screenshot` tool call.
pub async fn screenshot(req: ScreenshotRequest) -> Result<String> {
    validate_safe("output path", &req.output_path)?;
    let udid = resolve_udid(req.udid).await?;
    simctl::screenshot(&udid, &req.output_path).await?;
    Ok(format!("✅ Screenshot saved to: {}\n", req.output_path))
}

/// Handle a `simulator_logs` tool call.
pub async fn logs(req: SimulatorLogsRequest) -> Result<String> {
    validate_safe("log window", &req.last)?;
    let udid = resolve_udid(req.udid).await?;
    let text = simctl::get_logs(&udid, req.predicate.as_deref(), &req.last).await?;
    Ok(text)
}

/// A missing UDID targets the currently booted simulator.
async fn resolve_udid(udid: Option<String>) -> Result<String> {
    match udid {
        Some(udid) => {
            validate_safe("udid", &udid)?;
            Ok(udid)
        }
        None => {
            let booted = simctl::get_booted_simulator().await?;
            booted
                .map(|s| s.udid)
                .ok_or_else(|| XcserveError::SimulatorNotFound("no booted simulator".to_string()))
        }
    }
}
