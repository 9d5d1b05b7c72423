// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Output parsing for xcodebuild and swift tool output
//!
//! Converts free-form tool text into structured results. The matching rules
//! live only here so a format change in the toolchain touches one module.
//! Parsing is pure and never fails: text that matches nothing yields an
//! empty result and the exit code stands as the sole signal.

use regex_lite::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Severity of one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One compiler diagnostic, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// One failing test with the assertion reason that accompanied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingTest {
    pub identifier: String,
    pub reason: String,
}

/// Parsed counts and failures of a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCounts {
    /// Mirrors the exit code; the tool's exit status is authoritative even
    /// when the summary line was not found.
    pub success: bool,
    pub passed: u32,
    pub failed: u32,
    pub failing: Vec<FailingTest>,
}

/// `<file>:<line>:<col>: error|warning: <message>`. The file segment may
/// contain spaces but never a colon.
fn located_diagnostic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([^:]+):(\d+):(\d+):\s+(error|warning):\s+(.+)$")
            .expect("located diagnostic pattern is valid")
    })
}

/// Location-free diagnostics, e.g. linker and xcodebuild-level errors.
fn bare_diagnostic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:xcodebuild:\s+|ld:\s+)?(error|warning):\s+(.+)$")
            .expect("bare diagnostic pattern is valid")
    })
}

/// `Executed N tests, with M failures (...)` — per-suite and aggregate.
fn executed_summary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Executed (\d+) tests?, with (\d+) failures?")
            .expect("executed summary pattern is valid")
    })
}

/// `Test Case '-[Target.Class method]' failed` (Xcode) or
/// `Test Case 'Class.method' failed` (swift test).
fn failed_test_case() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Test Case '(?:-\[)?([^']+?)\]?' failed")
            .expect("failed test case pattern is valid")
    })
}

/// Assertion reason line: `<file>:<line>: error: <test identifier> : <reason>`.
fn assertion_reason() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":\d+:\s+error:\s+(?:-\[)?([^:\]]+?)\]?\s+:\s+(.+)$")
            .expect("assertion reason pattern is valid")
    })
}

fn severity_from(token: &str) -> Severity {
    if token == "error" {
        Severity::Error
    } else {
        Severity::Warning
    }
}

/// Extract diagnostics from combined build output.
///
/// A zero exit is trusted outright: successful builds can contain
/// warning-shaped strings (shell script phases, asset catalogs) that would be
/// misclassified, so no scraping happens at all. Multi-architecture builds
/// repeat each diagnostic once per arch with a differing preamble; the
/// normalized `(file, line, message)` tuple collapses them to the first
/// occurrence.
pub fn parse_build_issues(exit_code: i32, output: &str) -> Vec<Issue> {
    if exit_code == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    let mut seen: HashSet<(String, Option<u32>, String)> = HashSet::new();

    for line in output.lines() {
        let line = line.trim_end();

        if let Some(caps) = located_diagnostic().captures(line.trim_start()) {
            let file = caps[1].trim().to_string();
            let line_no = caps[2].parse::<u32>().ok();
            let column = caps[3].parse::<u32>().ok();
            let severity = severity_from(&caps[4]);
            let message = caps[5].to_string();

            if seen.insert((file.clone(), line_no, message.clone())) {
                issues.push(Issue {
                    severity,
                    message,
                    file: Some(file),
                    line: line_no,
                    column,
                });
            }
            continue;
        }

        if let Some(caps) = bare_diagnostic().captures(line.trim_start()) {
            let severity = severity_from(&caps[1]);
            let message = caps[2].to_string();

            if seen.insert((String::new(), None, message.clone())) {
                issues.push(Issue {
                    severity,
                    message,
                    file: None,
                    line: None,
                    column: None,
                });
            }
        }
    }

    issues
}

/// Extract pass/fail counts and failing tests from a test run.
///
/// Counts come from the final `Executed N tests` aggregate line, not from
/// counting failure entries; an aborted run may leave them at zero. Failing
/// tests keep their source order of appearance.
pub fn parse_test_results(exit_code: i32, output: &str) -> TestCounts {
    let mut total = 0u32;
    let mut failed = 0u32;
    let mut reasons: HashMap<String, String> = HashMap::new();
    let mut failing: Vec<FailingTest> = Vec::new();
    let mut failed_seen: HashSet<String> = HashSet::new();

    for line in output.lines() {
        // Suites report their own Executed lines before the aggregate; the
        // last one wins.
        if let Some(caps) = executed_summary().captures(line) {
            total = caps[1].parse().unwrap_or(0);
            failed = caps[2].parse().unwrap_or(0);
            continue;
        }

        if let Some(caps) = assertion_reason().captures(line) {
            let identifier = normalize_identifier(&caps[1]);
            reasons.entry(identifier).or_insert_with(|| caps[2].to_string());
            continue;
        }

        if let Some(caps) = failed_test_case().captures(line) {
            let identifier = normalize_identifier(&caps[1]);
            if failed_seen.insert(identifier.clone()) {
                let reason = reasons
                    .get(&identifier)
                    .cloned()
                    .unwrap_or_else(|| "failure reason not reported".to_string());
                failing.push(FailingTest { identifier, reason });
            }
        }
    }

    TestCounts {
        success: exit_code == 0,
        passed: total.saturating_sub(failed),
        failed,
        failing,
    }
}

/// Xcode writes identifiers as `Target.Class method`; swift test writes
/// `Class.method`. Normalize both to dotted form.
fn normalize_identifier(raw: &str) -> String {
    raw.trim().replace(' ', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED_BUILD: &str = "\
Build settings from command line:
    SDKROOT = iphonesimulator18.0

CompileSwift normal arm64 /work/MyApp/Sources/Login.swift
/work/MyApp/Sources/Login.swift:42:13: error: use of unresolved identifier 'pasword'
/work/MyApp/Sources/Login.swift:44:5: warning: variable 'token' was never used
CompileSwift normal x86_64 /work/MyApp/Sources/Login.swift
/work/MyApp/Sources/Login.swift:42:13: error: use of unresolved identifier 'pasword'
/work/MyApp/Sources/Login.swift:44:5: warning: variable 'token' was never used
ld: error: framework not found SnapKit

** BUILD FAILED **
";

    #[test]
    fn test_located_diagnostics_keep_source_order() {
        let issues = parse_build_issues(65, FAILED_BUILD);
        assert_eq!(issues.len(), 3);

        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].file.as_deref(), Some("/work/MyApp/Sources/Login.swift"));
        assert_eq!(issues[0].line, Some(42));
        assert_eq!(issues[0].column, Some(13));
        assert_eq!(issues[0].message, "use of unresolved identifier 'pasword'");

        assert_eq!(issues[1].severity, Severity::Warning);
        assert_eq!(issues[1].line, Some(44));

        assert_eq!(issues[2].severity, Severity::Error);
        assert_eq!(issues[2].file, None);
        assert_eq!(issues[2].message, "framework not found SnapKit");
    }

    #[test]
    fn test_dedup_collapses_per_architecture_repeats() {
        let issues = parse_build_issues(65, FAILED_BUILD);
        let at_42: Vec<_> = issues.iter().filter(|i| i.line == Some(42)).collect();
        assert_eq!(at_42.len(), 1);
    }

    #[test]
    fn test_dedup_collapses_identical_tuples_even_across_real_arch_differences() {
        // A genuinely arch-specific diagnostic with incidentally identical
        // text is collapsed too. Known limitation, kept deliberately.
        let output = "\
CompileSwift normal arm64 /w/a.swift
/w/a.swift:1:1: error: integer literal overflows
CompileSwift normal x86_64 /w/a.swift
/w/a.swift:1:1: error: integer literal overflows
";
        let issues = parse_build_issues(1, output);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_single_compile_error_yields_exactly_one_issue() {
        let output = "\
CompileSwift normal arm64 /work/Fixture/Sources/main.swift
/work/Fixture/Sources/main.swift:7:9: error: cannot find 'frobnicate' in scope
** BUILD FAILED **
";
        let issues = parse_build_issues(65, output);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].file.as_deref(), Some("/work/Fixture/Sources/main.swift"));
        assert_eq!(issues[0].line, Some(7));
    }

    #[test]
    fn test_zero_exit_extracts_nothing() {
        let output = "warning: something that looks like a warning\n** BUILD SUCCEEDED **\n";
        assert!(parse_build_issues(0, output).is_empty());
    }

    #[test]
    fn test_unrecognized_text_degrades_to_empty() {
        let issues = parse_build_issues(70, "garbage output in some future format\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_build_issues(65, FAILED_BUILD);
        let second = parse_build_issues(65, FAILED_BUILD);
        assert_eq!(first, second);
    }

    const FAILED_TESTS: &str = "\
Test Suite 'LoginTests' started at 2026-02-03 10:00:00.000
Test Case '-[MyAppTests.LoginTests testValidLogin]' started.
Test Case '-[MyAppTests.LoginTests testValidLogin]' passed (0.015 seconds).
Test Case '-[MyAppTests.LoginTests testTokenRefresh]' started.
Test Case '-[MyAppTests.LoginTests testTokenRefresh]' passed (0.003 seconds).
Test Case '-[MyAppTests.LoginTests testLogout]' started.
Test Case '-[MyAppTests.LoginTests testLogout]' passed (0.002 seconds).
Test Case '-[MyAppTests.LoginTests testInvalidLogin]' started.
/work/MyApp/Tests/LoginTests.swift:51: error: -[MyAppTests.LoginTests testInvalidLogin] : XCTAssertEqual failed: (\"401\") is not equal to (\"403\")
Test Case '-[MyAppTests.LoginTests testInvalidLogin]' failed (0.021 seconds).
Test Case '-[MyAppTests.LoginTests testExpiredToken]' started.
/work/MyApp/Tests/LoginTests.swift:78: error: -[MyAppTests.LoginTests testExpiredToken] : XCTAssertTrue failed
Test Case '-[MyAppTests.LoginTests testExpiredToken]' failed (0.004 seconds).
Test Suite 'LoginTests' failed at 2026-02-03 10:00:01.000.
\t Executed 5 tests, with 2 failures (0 unexpected) in 0.045 (0.050) seconds
Test Suite 'All tests' failed at 2026-02-03 10:00:01.000.
\t Executed 5 tests, with 2 failures (0 unexpected) in 0.045 (0.052) seconds
";

    #[test]
    fn test_counts_come_from_the_final_aggregate() {
        let result = parse_test_results(65, FAILED_TESTS);
        assert!(!result.success);
        assert_eq!(result.passed, 3);
        assert_eq!(result.failed, 2);
    }

    #[test]
    fn test_failing_tests_carry_reasons_in_order() {
        let result = parse_test_results(65, FAILED_TESTS);
        assert_eq!(result.failing.len(), 2);
        assert_eq!(
            result.failing[0].identifier,
            "MyAppTests.LoginTests.testInvalidLogin"
        );
        assert_eq!(
            result.failing[0].reason,
            "XCTAssertEqual failed: (\"401\") is not equal to (\"403\")"
        );
        assert_eq!(
            result.failing[1].identifier,
            "MyAppTests.LoginTests.testExpiredToken"
        );
        assert_eq!(result.failing[1].reason, "XCTAssertTrue failed");
    }

    #[test]
    fn test_swift_test_identifier_form() {
        let output = "\
Test Case 'LoginTests.testInvalidLogin' started.
/work/pkg/Tests/LoginTests.swift:51: error: LoginTests.testInvalidLogin : XCTAssertEqual failed
Test Case 'LoginTests.testInvalidLogin' failed (0.01 seconds).
Executed 1 test, with 1 failure (0 unexpected) in 0.01 (0.01) seconds
";
        let result = parse_test_results(1, output);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failing.len(), 1);
        assert_eq!(result.failing[0].identifier, "LoginTests.testInvalidLogin");
        assert_eq!(result.failing[0].reason, "XCTAssertEqual failed");
    }

    #[test]
    fn test_aborted_run_leaves_zero_counts() {
        let result = parse_test_results(70, "xcodebuild: error: unable to attach\n");
        assert_eq!(result.passed, 0);
        assert_eq!(result.failed, 0);
        assert!(result.failing.is_empty());
    }

    #[test]
    fn test_missing_reason_uses_placeholder() {
        let output = "Test Case '-[T.C m]' failed (0.01 seconds).\n";
        let result = parse_test_results(1, output);
        assert_eq!(result.failing.len(), 1);
        assert_eq!(result.failing[0].reason, "failure reason not reported");
    }
}
