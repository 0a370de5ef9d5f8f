//! Shared fixtures: specs and test cases stored as JSON under
//! `tests/testdata`, so the same documents can drive other implementations.

#![allow(dead_code)]

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use vld_spec::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub data: Value,
    pub expected_valid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestCaseFile {
    test_cases: Vec<TestCase>,
}

pub fn testdata(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("testdata");
    for part in parts {
        path.push(part);
    }
    path
}

pub fn load_spec(name: &str) -> Spec {
    let path = testdata(&["specs", name]);
    Spec::parse(&path).unwrap_or_else(|e| panic!("failed to load spec {}: {}", path.display(), e))
}

pub fn load_cases(name: &str) -> Vec<TestCase> {
    let path = testdata(&["cases", name]);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    let file: TestCaseFile = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e));
    file.test_cases
}

/// Run every case of `name` against the spec of the same name.
pub fn run_shared_cases(name: &str) {
    let spec = load_spec(name);
    let cases = load_cases(name);
    assert!(!cases.is_empty(), "{} has no test cases", name);

    let mut failures = Vec::new();
    for case in &cases {
        let result = vld_spec::validate(&case.data, &spec);
        if result.is_valid() != case.expected_valid {
            failures.push(format!(
                "{}: expected valid={}, got errors:\n{}",
                case.name, case.expected_valid, result
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
