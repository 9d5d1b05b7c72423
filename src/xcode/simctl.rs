// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! simctl command wrapper for simulator lifecycle management
//!
//! Thin single-shot wrappers around `xcrun simctl`. The build core only
//! consumes `ensure_booted`; everything else backs the simulator tools on the
//! dispatch surface. simctl serializes conflicting operations itself.

use crate::error::{Result, XcserveError};
use crate::xcode::destination::looks_like_udid;
use crate::xcode::platform::PlatformInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::process::Command;

/// Simulator device information, as reported by `simctl list -j`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulator {
    pub udid: String,
    pub name: String,
    pub state: String,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    /// Public platform name, derived from the runtime key.
    #[serde(default)]
    pub platform: String,
}

#[derive(Debug, Deserialize)]
struct SimctlListOutput {
    devices: HashMap<String, Vec<Simulator>>,
}

/// Run a simctl subcommand and capture stdout.
async fn simctl(args: &[&str]) -> Result<String> {
    let output = Command::new("xcrun")
        .arg("simctl")
        .args(args)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                XcserveError::ToolNotFound {
                    tool: "xcrun".to_string(),
                    detail: e.to_string(),
                }
            } else {
                XcserveError::CommandFailed(format!("simctl failed: {}", e))
            }
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(XcserveError::SimulatorError(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

/// Map a runtime key like `com.apple.CoreSimulator.SimRuntime.iOS-18-0` to a
/// public platform name. Unrecognized runtimes pass through untouched.
fn platform_from_runtime(runtime_key: &str) -> String {
    let tail = runtime_key
        .rsplit('.')
        .next()
        .unwrap_or(runtime_key);
    let os = tail.split('-').next().unwrap_or(tail);
    match PlatformInfo::parse(os) {
        Ok(p) => p.name.to_string(),
        Err(_) => os.to_string(),
    }
}

/// List available simulators, optionally restricted to one platform.
pub async fn list_devices(platform: Option<&'static PlatformInfo>) -> Result<Vec<Simulator>> {
    let output = simctl(&["list", "devices", "-j"]).await?;
    let list: SimctlListOutput = serde_json::from_str(&output)
        .map_err(|e| XcserveError::Internal(format!("failed to parse simctl output: {}", e)))?;

    let mut simulators = Vec::new();
    for (runtime, devices) in list.devices {
        let platform_name = platform_from_runtime(&runtime);
        if let Some(p) = platform {
            if platform_name != p.name {
                continue;
            }
        }
        for mut device in devices {
            if device.is_available {
                device.platform = platform_name.clone();
                simulators.push(device);
            }
        }
    }

    Ok(simulators)
}

/// Get a simulator by UDID.
pub async fn get_simulator(udid: &str) -> Result<Simulator> {
    let simulators = list_devices(None).await?;
    simulators
        .into_iter()
        .find(|s| s.udid == udid)
        .ok_or_else(|| XcserveError::SimulatorNotFound(udid.to_string()))
}

/// Find a simulator by display name within one platform.
pub async fn find_by_name(platform: &'static PlatformInfo, name: &str) -> Result<Simulator> {
    let simulators = list_devices(Some(platform)).await?;
    simulators
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| XcserveError::SimulatorNotFound(name.to_string()))
}

/// Get the currently booted simulator, if any.
pub async fn get_booted_simulator() -> Result<Option<Simulator>> {
    let simulators = list_devices(None).await?;
    Ok(simulators.into_iter().find(|s| s.state == "Booted"))
}

/// Boot a simulator and wait for it to reach the Booted state.
pub async fn boot(udid: &str) -> Result<()> {
    let sim = get_simulator(udid).await?;
    if sim.state == "Booted" {
        tracing::info!("simulator {} is already booted", udid);
        return Ok(());
    }

    tracing::info!("booting simulator {}", udid);
    simctl(&["boot", udid]).await?;

    for _ in 0..30 {
        tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
        let sim = get_simulator(udid).await?;
        if sim.state == "Booted" {
            tracing::info!("simulator {} is now booted", udid);
            return Ok(());
        }
    }

    Err(XcserveError::SimulatorError(
        "simulator boot timeout".to_string(),
    ))
}

/// Resolve a device identifier for a platform and make sure it is booted.
///
/// Prerequisite for building against a device-specific destination: UDIDs
/// resolve directly, names resolve within the platform, and no identifier
/// falls back to the platform's default device.
pub async fn ensure_booted(
    platform: &'static PlatformInfo,
    device_identifier: Option<&str>,
) -> Result<String> {
    let simulator = match device_identifier {
        Some(id) if looks_like_udid(id) => get_simulator(id).await?,
        Some(name) => find_by_name(platform, name).await?,
        None => find_by_name(platform, platform.default_device).await?,
    };

    boot(&simulator.udid).await?;
    Ok(simulator.udid)
}

/// Shutdown a simulator ("all" shuts down every booted device).
pub async fn shutdown(udid: &str) -> Result<()> {
    tracing::info!("shutting down simulator {}", udid);
    simctl(&["shutdown", udid]).await?;
    Ok(())
}

/// Install an app bundle on a simulator ("booted" targets the booted device).
pub async fn install(udid: &str, app_path: &str) -> Result<()> {
    tracing::info!("installing {} to simulator {}", app_path, udid);
    simctl(&["install", udid, app_path]).await?;
    Ok(())
}

/// Uninstall an app from a simulator.
pub async fn uninstall(udid: &str, bundle_id: &str) -> Result<()> {
    tracing::info!("uninstalling {} from simulator {}", bundle_id, udid);
    simctl(&["uninstall", udid, bundle_id]).await?;
    Ok(())
}

/// Capture a screenshot to the given path.
pub async fn screenshot(udid: &str, output_path: &str) -> Result<()> {
    simctl(&["io", udid, "screenshot", output_path]).await?;
    Ok(())
}

/// Capture recent device log output.
pub async fn get_logs(udid: &str, predicate: Option<&str>, last: &str) -> Result<String> {
    let mut args = vec!["spawn", udid, "log", "show", "--last", last, "--style", "compact"];
    if let Some(predicate) = predicate {
        args.push("--predicate");
        args.push(predicate);
    }
    simctl(&args).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_runtime_key() {
        assert_eq!(
            platform_from_runtime("com.apple.CoreSimulator.SimRuntime.iOS-18-0"),
            "iOS"
        );
        assert_eq!(
            platform_from_runtime("com.apple.CoreSimulator.SimRuntime.xrOS-2-0"),
            "visionOS"
        );
        assert_eq!(
            platform_from_runtime("com.apple.CoreSimulator.SimRuntime.watchOS-11-0"),
            "watchOS"
        );
    }

    #[test]
    fn test_unknown_runtime_passes_through() {
        assert_eq!(
            platform_from_runtime("com.apple.CoreSimulator.SimRuntime.futureOS-1-0"),
            "futureOS"
        );
    }

    #[test]
    fn test_list_output_deserializes() {
        let json = r#"{
            "devices": {
                "com.apple.CoreSimulator.SimRuntime.iOS-18-0": [
                    {
                        "udid": "550E8400-E29B-41D4-A716-446655440000",
                        "name": "iPhone 16",
                        "state": "Shutdown",
                        "isAvailable": true
                    }
                ]
            }
        }"#;
        let parsed: SimctlListOutput = serde_json::from_str(json).unwrap();
        let devices = &parsed.devices["com.apple.CoreSimulator.SimRuntime.iOS-18-0"];
        assert_eq!(devices[0].name, "iPhone 16");
        assert!(devices[0].is_available);
    }
}
