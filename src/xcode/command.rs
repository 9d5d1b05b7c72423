// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Command assembly for xcodebuild and swift invocations
//!
//! Builds argv vectors from validated request fields. Arguments are always
//! passed as discrete argv entries, never through a shell, and every
//! user-controlled field is screened for traversal and metacharacter
//! sequences before any command exists.

use crate::error::{Result, XcserveError};
use std::path::Path;

/// A fully-assembled subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Single-line rendering for logs and debug snapshots. Arguments with
    /// spaces are quoted for readability; this string is never executed.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            if arg.contains(' ') {
                out.push('\'');
                out.push_str(arg);
                out.push('\'');
            } else {
                out.push_str(arg);
            }
        }
        out
    }
}

/// Characters and sequences never allowed in user-controlled fields.
/// This gate runs before command assembly; nothing downstream re-checks.
const FORBIDDEN_SEQUENCES: &[&str] = &["..", "~", ";", "`", "$"];

/// Reject traversal and shell-metacharacter sequences in a request field.
pub fn validate_safe(field: &str, value: &str) -> Result<()> {
    for seq in FORBIDDEN_SEQUENCES {
        if value.contains(seq) {
            return Err(XcserveError::Validation(format!(
                "{} contains forbidden sequence '{}': {}",
                field, seq, value
            )));
        }
    }
    Ok(())
}

/// Kind of project a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Workspace,
    Project,
    SwiftPackage,
}

/// Validate a project path: safe characters, recognized kind, exists on disk.
pub fn validate_project_path(path: &str) -> Result<ProjectKind> {
    validate_safe("project path", path)?;

    let p = Path::new(path);
    if path.ends_with(".xcworkspace") || path.ends_with(".xcodeproj") {
        if !p.exists() {
            return Err(XcserveError::ProjectNotFound(path.to_string()));
        }
        if path.ends_with(".xcworkspace") {
            return Ok(ProjectKind::Workspace);
        }
        return Ok(ProjectKind::Project);
    }

    if !p.exists() {
        return Err(XcserveError::ProjectNotFound(path.to_string()));
    }
    if p.join("Package.swift").exists() {
        return Ok(ProjectKind::SwiftPackage);
    }

    Err(XcserveError::Validation(format!(
        "not an .xcodeproj, .xcworkspace or Swift package directory: {}",
        path
    )))
}

/// Parameters for an xcodebuild build invocation.
#[derive(Debug, Clone)]
pub struct XcodebuildParams {
    pub project_path: String,
    pub kind: ProjectKind,
    /// None builds the project's default scheme.
    pub scheme: Option<String>,
    pub configuration: String,
    pub destination_arg: String,
    pub derived_data_path: String,
}

impl XcodebuildParams {
    fn common_args(&self, args: &mut Vec<String>) {
        match self.kind {
            ProjectKind::Workspace => {
                args.push("-workspace".to_string());
                args.push(self.project_path.clone());
            }
            ProjectKind::Project => {
                args.push("-project".to_string());
                args.push(self.project_path.clone());
            }
            ProjectKind::SwiftPackage => {
                // Swift packages take the swift-cli path; see SwiftParams.
                unreachable!("swift packages do not build through xcodebuild");
            }
        }

        if let Some(scheme) = &self.scheme {
            args.push("-scheme".to_string());
            args.push(scheme.clone());
        }

        args.push("-configuration".to_string());
        args.push(self.configuration.clone());

        args.push("-destination".to_string());
        args.push(self.destination_arg.clone());

        args.push("-derivedDataPath".to_string());
        args.push(self.derived_data_path.clone());
    }

    /// Assemble a build invocation.
    pub fn build_invocation(&self) -> Invocation {
        let mut args = vec!["build".to_string()];
        self.common_args(&mut args);
        Invocation {
            program: "xcodebuild".to_string(),
            args,
        }
    }

    /// Assemble a test invocation with optional class/method-level filters.
    pub fn test_invocation(&self, filters: &[TestFilter]) -> Invocation {
        let mut args = vec!["test".to_string()];
        self.common_args(&mut args);

        for filter in filters {
            args.push("-only-testing".to_string());
            args.push(filter.identifier());
        }

        Invocation {
            program: "xcodebuild".to_string(),
            args,
        }
    }
}

/// A test filter at target, class or method granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFilter {
    pub target: String,
    pub class: Option<String>,
    pub method: Option<String>,
}

impl TestFilter {
    /// `<Target>[/<Class>[/<Method>]]` as xcodebuild expects.
    pub fn identifier(&self) -> String {
        let mut id = self.target.clone();
        if let Some(class) = &self.class {
            id.push('/');
            id.push_str(class);
            if let Some(method) = &self.method {
                id.push('/');
                id.push_str(method);
            }
        }
        id
    }
}

/// Action for a Swift package invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwiftAction {
    Build,
    Test,
    Run,
}

impl SwiftAction {
    fn as_str(&self) -> &'static str {
        match self {
            SwiftAction::Build => "build",
            SwiftAction::Test => "test",
            SwiftAction::Run => "run",
        }
    }
}

/// Parameters for a `swift build|test|run` invocation. Structurally parallel
/// to `XcodebuildParams` but a distinct grammar: SPM has no schemes or
/// destinations.
#[derive(Debug, Clone)]
pub struct SwiftParams {
    pub package_path: String,
    pub action: SwiftAction,
    /// "debug" or "release".
    pub configuration: String,
    pub target: Option<String>,
    pub product: Option<String>,
    /// `swift test --filter` expression.
    pub filter: Option<String>,
}

impl SwiftParams {
    pub fn invocation(&self) -> Invocation {
        let mut args = vec![self.action.as_str().to_string()];

        args.push("--package-path".to_string());
        args.push(self.package_path.clone());

        args.push("-c".to_string());
        args.push(self.configuration.clone());

        if let Some(target) = &self.target {
            args.push("--target".to_string());
            args.push(target.clone());
        }

        if let Some(product) = &self.product {
            args.push("--product".to_string());
            args.push(product.clone());
        }

        if let Some(filter) = &self.filter {
            if self.action == SwiftAction::Test {
                args.push("--filter".to_string());
                args.push(filter.clone());
            }
        }

        Invocation {
            program: "swift".to_string(),
            args,
        }
    }
}
