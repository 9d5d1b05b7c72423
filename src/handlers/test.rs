// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Test orchestration
//!
//! Same pipeline as the build handler with a test invocation and test-result
//! parsing. Filters arrive at target, class or method granularity and are
//! validated like every other user-controlled field.

use crate::error::Result;
use crate::handlers::build::{check_scheme_rejection, combine, prepare, run};
use crate::logs;
use crate::models::{BuildRequest, TestRequest, TestResponse};
use crate::state::SharedState;
use crate::xcode::command::{validate_safe, TestFilter};
use crate::xcode::parser;

/// Handle a `test` tool call.
pub async fn test(state: &SharedState, req: TestRequest) -> Result<String> {
    let filters = convert_filters(&req)?;

    // Tests share the build pipeline's validation and resolution stages.
    let build_req = BuildRequest {
        project_path: req.project_path.clone(),
        scheme: req.scheme.clone(),
        platform: req.platform.clone(),
        device_id: req.device_id.clone(),
        configuration: req.configuration.clone(),
        derived_data_path: req.derived_data_path.clone(),
        universal: false,
    };
    let prepared = prepare(state, &build_req).await?;
    let invocation = prepared.params.test_invocation(&filters);

    let outcome = run(state, &invocation).await?;
    check_scheme_rejection(&outcome)?;

    let combined = combine(&outcome);
    let counts = parser::parse_test_results(outcome.exit_code, &combined);

    let label = req.scheme.as_deref().unwrap_or("default");
    let log_path = logs::save_log(&state.config.log_dir, "test", label, &combined).await;
    logs::save_debug_data(
        &state.config.log_dir,
        "test-command",
        label,
        &invocation.display(),
    )
    .await;

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

fn convert_filters(req: &TestRequest) -> Result<Vec<TestFilter>> {
    let mut filters = Vec::with_capacity(req.filters.len());
    for spec in &req.filters {
        validate_safe("test target", &spec.target)?;
        if let Some(class) = &spec.class {
            validate_safe("test class", class)?;
        }
        if let Some(method) = &spec.method {
            validate_safe("test method", method)?;
        }
        filters.push(TestFilter {
            target: spec.target.clone(),
            class: spec.class.clone(),
            method: spec.method.clone(),
        });
    }
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestFilterSpec;

    fn request_with_filter(filter: TestFilterSpec) -> TestRequest {
        TestRequest {
            project_path: "/work/App.xcodeproj".to_string(),
            scheme: Some("MyApp".to_string()),
            platform: "ios".to_string(),
            device_id: None,
            configuration: "Debug".to_string(),
            derived_data_path: None,
            filters: vec![filter],
        }
    }

    #[test]
    fn test_filters_convert_to_slash_identifiers() {
        let req = request_with_filter(TestFilterSpec {
            target: "MyAppTests".to_string(),
            class: Some("LoginTests".to_string()),
            method: None,
        });
        let filters = convert_filters(&req).unwrap();
        assert_eq!(filters[0].identifier(), "MyAppTests/LoginTests");
    }

    #[test]
    fn test_filter_fields_are_validated() {
        let req = request_with_filter(TestFilterSpec {
            target: "MyAppTests; rm -rf /".to_string(),
            class: None,
            method: None,
        });
        assert!(convert_filters(&req).is_err());
    }
}
