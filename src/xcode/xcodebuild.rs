// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! xcodebuild probe and listing helpers

use crate::error::{Result, XcserveError};
use crate::xcode::command::ProjectKind;
use serde::Deserialize;
use tokio::process::Command;

/// Get the installed Xcode version.
pub async fn get_xcode_version() -> Result<String> {
    let output = Command::new("xcodebuild")
        .arg("-version")
        .output()
        .await
        .map_err(|_| XcserveError::XcodeNotFound)?;

    if !output.status.success() {
        return Err(XcserveError::XcodeNotFound);
    }

    let version = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or("Unknown")
        .to_string();

    Ok(version)
}

/// Schemes and configurations of a project or workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeList {
    pub name: String,
    pub schemes: Vec<String>,
    pub configurations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListOutput {
    #[serde(default)]
    project: Option<ListEntry>,
    #[serde(default)]
    workspace: Option<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    name: String,
    #[serde(default)]
    schemes: Vec<String>,
    #[serde(default)]
    configurations: Vec<String>,
}

/// List schemes and configurations via `xcodebuild -list -json`.
///
/// This is the companion tool referenced by scheme/configuration rejection
/// errors; it never builds anything.
pub async fn list_schemes(project_path: &str, kind: ProjectKind) -> Result<SchemeList> {
    let container_flag = match kind {
        ProjectKind::Workspace => "-workspace",
        ProjectKind::Project => "-project",
        ProjectKind::SwiftPackage => {
            return Err(XcserveError::Validation(
                "Swift packages have no schemes; use swift_package targets instead".to_string(),
            ));
        }
    };

    let output = Command::new("xcodebuild")
        .args(["-list", "-json", container_flag, project_path])
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                XcserveError::ToolNotFound {
                    tool: "xcodebuild".to_string(),
                    detail: e.to_string(),
                }
            } else {
                XcserveError::CommandFailed(format!("xcodebuild -list failed: {}", e))
            }
        })?;

    if !output.status.success() {
        return Err(XcserveError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_scheme_list(&stdout)
}

fn parse_scheme_list(json: &str) -> Result<SchemeList> {
    let parsed: ListOutput = serde_json::from_str(json)
        .map_err(|e| XcserveError::Internal(format!("failed to parse -list output: {}", e)))?;

    let entry = parsed
        .project
        .or(parsed.workspace)
        .ok_or_else(|| XcserveError::Internal("-list output had no project or workspace".into()))?;

    Ok(SchemeList {
        name: entry.name,
        schemes: entry.schemes,
        configurations: entry.configurations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_list_output() {
        let json = r#"{
            "project": {
                "name": "MyApp",
                "configurations": ["Debug", "Release", "Staging"],
                "schemes": ["MyApp", "MyAppTests"],
                "targets": ["MyApp"]
            }
        }"#;
        let list = parse_scheme_list(json).unwrap();
        assert_eq!(list.name, "MyApp");
        assert_eq!(list.schemes, vec!["MyApp", "MyAppTests"]);
        assert_eq!(list.configurations, vec!["Debug", "Release", "Staging"]);
    }

    #[test]
    fn test_parse_workspace_list_output() {
        let json = r#"{
            "workspace": {
                "name": "MyApp",
                "schemes": ["MyApp"]
            }
        }"#;
        let list = parse_scheme_list(json).unwrap();
        assert_eq!(list.name, "MyApp");
        assert!(list.configurations.is_empty());
    }

    #[test]
    fn test_unexpected_list_output_is_internal_error() {
        assert!(parse_scheme_list("{}").is_err());
        assert!(parse_scheme_list("not json").is_err());
    }
}
