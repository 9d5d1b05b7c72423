// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Request models for the xcserve tool surface

use serde::Deserialize;

fn default_configuration() -> String {
    "Debug".to_string()
}

fn default_swift_configuration() -> String {
    "debug".to_string()
}

fn default_platform() -> String {
    "ios".to_string()
}

fn default_log_window() -> String {
    "3m".to_string()
}

/// Request to build an Xcode project or workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildRequest {
    /// Path to a .xcodeproj or .xcworkspace
    pub project_path: String,
    /// Build scheme; omitted builds the default scheme
    pub scheme: Option<String>,
    /// Target platform alias (e.g. "iOS", "visionos", "macos")
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Simulator UDID or device name; omitted uses a generic destination
    pub device_id: Option<String>,
    /// Build configuration; any configuration name the project defines
    #[serde(default = "default_configuration")]
    pub configuration: String,
    /// Custom derived data path; omitted uses the server default
    pub derived_data_path: Option<String>,
    /// macOS only: build all architectures instead of the host's
    #[serde(default)]
    pub universal: bool,
}

/// One test filter at target, class or method granularity.
#[derive(Debug, Clone, Deserialize)]
pub struct TestFilterSpec {
    pub target: String,
    pub class: Option<String>,
    pub method: Option<String>,
}

/// Request to run tests for an Xcode project or workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRequest {
    /// Path to a .xcodeproj or .xcworkspace
    pub project_path: String,
    /// Test scheme; omitted tests the default scheme
    pub scheme: Option<String>,
    /// Target platform alias
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Simulator UDID or device name
    pub device_id: Option<String>,
    /// Build configuration
    #[serde(default = "default_configuration")]
    pub configuration: String,
    /// Custom derived data path
    pub derived_data_path: Option<String>,
    /// Only run the listed tests
    #[serde(default)]
    pub filters: Vec<TestFilterSpec>,
}

/// Action for a Swift package request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwiftPackageAction {
    Build,
    Test,
    Run,
}

/// Request to build, test or run a Swift package.
#[derive(Debug, Clone, Deserialize)]
pub struct SwiftPackageRequest {
    /// Directory containing Package.swift
    pub package_path: String,
    pub action: SwiftPackageAction,
    /// "debug" or "release"
    #[serde(default = "default_swift_configuration")]
    pub configuration: String,
    /// Build only this target
    pub target: Option<String>,
    /// Build only this product
    pub product: Option<String>,
    /// `swift test --filter` expression (test action only)
    pub filter: Option<String>,
}

/// Request to list schemes and configurations.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSchemesRequest {
    /// Path to a .xcodeproj or .xcworkspace
    pub project_path: String,
}

/// Request to list simulators.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSimulatorsRequest {
    /// Restrict to one platform alias
    pub platform: Option<String>,
}

/// Request to boot a simulator.
#[derive(Debug, Clone, Deserialize)]
pub struct BootSimulatorRequest {
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Simulator UDID or device name; omitted uses the platform default
    pub device_id: Option<String>,
}

/// Request to shut down a simulator.
#[derive(Debug, Clone, Deserialize)]
pub struct ShutdownSimulatorRequest {
    /// Simulator UDID, or "all"
    pub udid: String,
}

/// Request to install an app on a simulator.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallAppRequest {
    /// Path to a .app bundle
    pub app_path: String,
    /// Simulator UDID; omitted targets the booted device
    pub udid: Option<String>,
}

/// Request to uninstall an app from a simulator.
#[derive(Debug, Clone, Deserialize)]
pub struct UninstallAppRequest {
    pub bundle_id: String,
    /// Simulator UDID; omitted targets the booted device
    pub udid: Option<String>,
}

/// Request to capture a simulator screenshot.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotRequest {
    /// Simulator UDID; omitted targets the booted device
    pub udid: Option<String>,
    /// Where to write the PNG
    pub output_path: String,
}

/// Request to capture recent simulator logs.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorLogsRequest {
    /// Simulator UDID; omitted targets the booted device
    pub udid: Option<String>,
    /// `log show` predicate expression
    pub predicate: Option<String>,
    /// Time window, e.g. "3m", "1h"
    #[serde(default = "default_log_window")]
    pub last: String,
}
