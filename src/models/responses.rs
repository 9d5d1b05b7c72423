// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Response models and their textual rendering
//!
//! Every tool call returns both structured fields and a rendered text block;
//! the text is what editor/agent clients display verbatim, so its shape
//! (failure marker, error count, file:line:col lines, log trailer) is part of
//! the contract.

use crate::xcode::parser::{FailingTest, Issue, Severity};
use crate::xcode::simctl::Simulator;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Result of a build run.
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub success: bool,
    pub exit_code: i32,
    pub issues: Vec<Issue>,
    pub app_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    /// Best-effort observations (e.g. configuration substitution).
    pub notes: Vec<String>,
}

impl BuildResponse {
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.success {
            out.push_str("✅ Build succeeded\n");
            match &self.app_path {
                Some(path) => {
                    let _ = writeln!(out, "App: {}", path.display());
                }
                None => out.push_str("App bundle not found in derived data\n"),
            }
        } else {
            let errors = self
                .issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count();
            let _ = writeln!(
                out,
                "❌ Build failed ({} error{})",
                errors,
                if errors == 1 { "" } else { "s" }
            );
            for issue in &self.issues {
                out.push_str(&render_issue(issue));
                out.push('\n');
            }
        }

        for note in &self.notes {
            let _ = writeln!(out, "⚠️ {}", note);
        }

        push_log_trailer(&mut out, &self.log_path);
        out
    }
}

/// Result of a test run.
#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub exit_code: i32,
    pub passed: u32,
    pub failed: u32,
    pub failing: Vec<FailingTest>,
    pub log_path: Option<PathBuf>,
}

impl TestResponse {
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.success {
            out.push_str("✅ Tests passed\n");
        } else {
            out.push_str("❌ Tests failed\n");
        }
        let _ = writeln!(out, "{} passed, {} failed", self.passed, self.failed);

        if !self.failing.is_empty() {
            out.push_str("Failing tests:\n");
            for test in &self.failing {
                let _ = writeln!(out, "  {}: {}", test.identifier, test.reason);
            }
        }

        push_log_trailer(&mut out, &self.log_path);
        out
    }
}

fn render_issue(issue: &Issue) -> String {
    let severity = match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match (&issue.file, issue.line, issue.column) {
        (Some(file), Some(line), Some(column)) => {
            format!("{}:{}:{}: {}: {}", file, line, column, severity, issue.message)
        }
        (Some(file), Some(line), None) => {
            format!("{}:{}: {}: {}", file, line, severity, issue.message)
        }
        _ => format!("{}: {}", severity, issue.message),
    }
}

fn push_log_trailer(out: &mut String, log_path: &Option<PathBuf>) {
    if let Some(path) = log_path {
        let _ = writeln!(out, "📁 Full logs saved to: {}", path.display());
    }
}

/// Result of a scheme listing.
#[derive(Debug, Serialize)]
pub struct SchemeListResponse {
    pub name: String,
    pub schemes: Vec<String>,
    pub configurations: Vec<String>,
}

impl SchemeListResponse {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Schemes in {}:", self.name);
        for scheme in &self.schemes {
            let _ = writeln!(out, "  {}", scheme);
        }
        if !self.configurations.is_empty() {
            out.push_str("Configurations:\n");
            for configuration in &self.configurations {
                let _ = writeln!(out, "  {}", configuration);
            }
        }
        out
    }
}

/// Result of a simulator listing.
#[derive(Debug, Serialize)]
pub struct SimulatorListResponse {
    pub simulators: Vec<Simulator>,
}

impl SimulatorListResponse {
    pub fn render(&self) -> String {
        if self.simulators.is_empty() {
            return "No available simulators\n".to_string();
        }
        let mut out = String::new();
        for sim in &self.simulators {
            let _ = writeln!(
                out,
                "{}  {}  {} ({})",
                sim.udid, sim.name, sim.platform, sim.state
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(file: &str, line: u32, column: u32, message: &str) -> Issue {
        Issue {
            severity: Severity::Error,
            message: message.to_string(),
            file: Some(file.to_string()),
            line: Some(line),
            column: Some(column),
        }
    }

    #[test]
    fn test_failed_build_rendering() {
        let response = BuildResponse {
            success: false,
            exit_code: 65,
            issues: vec![issue("/w/a.swift", 42, 13, "use of unresolved identifier")],
            app_path: None,
            log_path: Some(PathBuf::from("/logs/build.log")),
            notes: vec![],
        };
        let text = response.render();
        assert!(text.starts_with("❌ Build failed (1 error)\n"));
        assert!(text.contains("/w/a.swift:42:13: error: use of unresolved identifier"));
        assert!(text.contains("📁 Full logs saved to: /logs/build.log"));
    }

    #[test]
    fn test_successful_build_names_artifact_or_says_not_found() {
        let mut response = BuildResponse {
            success: true,
            exit_code: 0,
            issues: vec![],
            app_path: Some(PathBuf::from("/dd/Build/Products/Debug/MyApp.app")),
            log_path: None,
            notes: vec![],
        };
        assert!(response.render().contains("App: /dd/Build/Products/Debug/MyApp.app"));

        response.app_path = None;
        assert!(response.render().contains("App bundle not found in derived data"));
    }

    #[test]
    fn test_configuration_note_renders_as_warning_line() {
        let response = BuildResponse {
            success: true,
            exit_code: 0,
            issues: vec![],
            app_path: None,
            log_path: None,
            notes: vec!["Requested configuration 'Staging' but the artifact was produced under 'Debug-iphonesimulator' (best-effort detection)".to_string()],
        };
        assert!(response.render().contains("⚠️ Requested configuration 'Staging'"));
    }

    #[test]
    fn test_test_rendering_with_failures() {
        let response = TestResponse {
            success: false,
            exit_code: 65,
            passed: 3,
            failed: 2,
            failing: vec![
                FailingTest {
                    identifier: "MyAppTests.LoginTests.testInvalidLogin".to_string(),
                    reason: "XCTAssertEqual failed".to_string(),
                },
                FailingTest {
                    identifier: "MyAppTests.LoginTests.testExpiredToken".to_string(),
                    reason: "XCTAssertTrue failed".to_string(),
                },
            ],
            log_path: None,
        };
        let text = response.render();
        assert!(text.contains("3 passed, 2 failed"));
        assert!(text.contains("Failing tests:"));
        assert!(text.contains("  MyAppTests.LoginTests.testInvalidLogin: XCTAssertEqual failed"));
    }
}
