// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Swift package orchestration
//!
//! The SPM path mirrors the Xcode pipeline but with the `swift` CLI grammar:
//! no schemes, no destinations, `-c debug|release`.

use crate::error::{Result, XcserveError};
use crate::handlers::build::{combine, run};
use crate::logs;
use crate::models::{BuildResponse, SwiftPackageAction, SwiftPackageRequest, TestResponse};
use crate::state::SharedState;
use crate::xcode::command::{
    validate_project_path, validate_safe, ProjectKind, SwiftAction, SwiftParams,
};
use crate::xcode::parser;

/// Handle a `swift_package` tool call.
pub async fn swift_package(state: &SharedState, req: SwiftPackageRequest) -> Result<String> {
    let params = validate(&req)?;
    let invocation = params.invocation();

    let outcome = run(state, &invocation).await?;
    let combined = combine(&outcome);

    let label = req
        .product
        .as_deref()
        .or(req.target.as_deref())
        .unwrap_or("package");
    let kind = match req.action {
        SwiftPackageAction::Build => "swift-build",
        SwiftPackageAction::Test => "swift-test",
        SwiftPackageAction::Run => "swift-run",
    };
    let log_path = logs::save_log(&state.config.log_dir, kind, label, &combined).await;
    logs::save_debug_data(&state.config.log_dir, kind, label, &invocation.display()).await;

    match req.action {
        SwiftPackageAction::Test => {
            let counts = parser::parse_test_results(outcome.exit_code, &combined);
            let response = TestResponse {
                success: counts.success,
                exit_code: outcome.exit_code,
                passed: counts.passed,
                failed: counts.failed,
                failing: counts.failing,
                log_path,
            };
            Ok(response.render())
        }
        SwiftPackageAction::Build => {
            let issues = parser::parse_build_issues(outcome.exit_code, &combined);
            let response = BuildResponse {
                success: outcome.exit_code == 0,
                exit_code: outcome.exit_code,
                issues,
                app_path: None,
                log_path,
                notes: vec![],
            };
            Ok(response.render())
        }
        SwiftPackageAction::Run => {
            let mut out = if outcome.exit_code == 0 {
                "✅ Run finished\n".to_string()
            } else {
                format!("❌ Run exited with code {}\n", outcome.exit_code)
            };
            out.push_str(&outcome.stdout);
            if let Some(path) = &log_path {
                out.push_str(&format!("📁 Full logs saved to: {}\n", path.display()));
            }
            Ok(out)
        }
    }
}

fn validate(req: &SwiftPackageRequest) -> Result<SwiftParams> {
    let kind = validate_project_path(&req.package_path)?;
    if kind != ProjectKind::SwiftPackage {
        return Err(XcserveError::Validation(format!(
            "not a Swift package directory: {}",
            req.package_path
        )));
    }

    if req.configuration != "debug" && req.configuration != "release" {
        return Err(XcserveError::Validation(format!(
            "swift configuration must be 'debug' or 'release', got '{}'",
            req.configuration
        )));
    }

    if let Some(target) = &req.target {
        validate_safe("target", target)?;
    }
    if let Some(product) = &req.product {
        validate_safe("product", product)?;
    }
    if let Some(filter) = &req.filter {
        validate_safe("filter", filter)?;
        if req.action != SwiftPackageAction::Test {
            return Err(XcserveError::Validation(
                "filter only applies to the test action".to_string(),
            ));
        }
    }

    let action = match req.action {
        SwiftPackageAction::Build => SwiftAction::Build,
        SwiftPackageAction::Test => SwiftAction::Test,
        SwiftPackageAction::Run => SwiftAction::Run,
    };

    Ok(SwiftParams {
        package_path: req.package_path.clone(),
        action,
        configuration: req.configuration.clone(),
        target: req.target.clone(),
        product: req.product.clone(),
        filter: req.filter.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Package.swift"), "// swift-tools-version:5.9\n").unwrap();
        dir
    }

    fn request(dir: &tempfile::TempDir) -> SwiftPackageRequest {
        SwiftPackageRequest {
            package_path: dir.path().to_string_lossy().into_owned(),
            action: SwiftPackageAction::Build,
            configuration: "debug".to_string(),
            target: None,
            product: None,
            filter: None,
        }
    }

    #[test]
    fn test_configuration_is_restricted_to_spm_values() {
        let dir = package_dir();
        let mut req = request(&dir);
        req.configuration = "Debug".to_string();
        assert!(validate(&req).is_err());
        req.configuration = "release".to_string();
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_filter_requires_test_action() {
        let dir = package_dir();
        let mut req = request(&dir);
        req.filter = Some("LoginTests".to_string());
        assert!(validate(&req).is_err());
        req.action = SwiftPackageAction::Test;
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_non_package_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = SwiftPackageRequest {
            package_path: dir.path().to_string_lossy().into_owned(),
            action: SwiftPackageAction::Build,
            configuration: "debug".to_string(),
            target: None,
            product: None,
            filter: None,
        };
        assert!(validate(&req).is_err());
        req.package_path = "/work/App.xcodeproj".to_string();
        assert!(validate(&req).is_err());
    }
}
