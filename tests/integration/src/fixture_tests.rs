//! Golden-file tests using test-fixtures/
//!
//! These tests resolve the sample projects under `test-fixtures/projects`
//! end to end and compare a stable summary of the result against
//! `test-fixtures/expected`.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use strata_config::{ConfigReader, ConfigValue, Environment, Error};
use strata_test_utils::plugins::sample_registry;

/// Normalize line endings to LF for cross-platform comparison.
fn normalize_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn project_reader(name: &str) -> ConfigReader {
    strata_test_utils::logging::init();
    ConfigReader::new(fixtures_dir().join("projects").join(name), sample_registry())
        .unwrap_or_else(|e| panic!("Failed to open fixture project {name}: {e}"))
}

fn load_expected(filename: &str) -> String {
    let path = fixtures_dir().join("expected").join(filename);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read expected output at {}: {}", path.display(), e));
    normalize_line_endings(&content)
}

/// One line per stack: name, external name, region, protection, dependencies.
fn summarize(environment: &Environment) -> String {
    environment
        .iter_stacks()
        .map(|stack| {
            format!(
                "{} {} {} protect={} deps={}\n",
                stack.name,
                stack.external_name,
                stack.region,
                stack.protect,
                stack.dependencies.join(",")
            )
        })
        .collect()
}

#[test]
fn test_acme_tree_matches_golden_summary() {
    let root = project_reader("acme").build_environment("").unwrap();
    assert_eq!(summarize(&root), load_expected("acme-stacks.txt"));
}

#[test]
fn test_acme_web_stack_fully_resolved() {
    let reader = project_reader("acme");
    let root = reader.build_environment("").unwrap();
    let web = root.find_stack("prod/app/web").unwrap();

    assert_eq!(web.parameters["VpcId"], ConfigValue::from("prod/vpc.VpcId"));
    assert_eq!(web.parameters["Region"], ConfigValue::from("us-east-1"));
    assert_eq!(
        web.iam_role.as_deref(),
        Some("arn:aws:iam::123456789012:role/deploy")
    );
    assert_eq!(web.stack_tags["Environment"], ConfigValue::from("prod"));
    assert_eq!(web.user_data["team"], ConfigValue::from("acme-platform"));
    assert_eq!(
        web.template_path,
        reader.project_dir().join("templates/web.yaml")
    );

    let before_create = web.hooks["before_create"].as_sequence().unwrap();
    assert_eq!(
        before_create[0].as_map().unwrap()["argument"],
        ConfigValue::from("echo \"creating acme web\"")
    );
}

#[test]
fn test_acme_artifacts() {
    let root = project_reader("acme").build_environment("").unwrap();

    for stack in root.iter_stacks() {
        let artifact = stack.artifact.as_ref().unwrap();
        assert_eq!(artifact.bucket_name, "acme-artifacts");
        assert_eq!(artifact.region, stack.region);
        assert!(
            artifact
                .bucket_key
                .starts_with(&format!("cfn/{}/", stack.external_name)),
            "unexpected key {}",
            artifact.bucket_key
        );
    }
}

#[test]
fn test_acme_environment_lookup() {
    let root = project_reader("acme").build_environment("").unwrap();

    let app = root.find_environment("prod/app").unwrap();
    assert_eq!(app.stacks.len(), 1);
    assert!(root.find_environment("staging").is_none());
    assert_eq!(root.depth(), 2);
}

#[test]
fn test_locked_project_rejects_running_version() {
    let reader = project_reader("locked");

    match reader.build_environment("").unwrap_err() {
        Error::VersionIncompatible { required, .. } => assert_eq!(required, "<0.0.1"),
        other => panic!("Expected VersionIncompatible, got {other:?}"),
    }
}

#[test]
fn test_fixture_tree_serializes_to_json() {
    let root = project_reader("acme").build_environment("").unwrap();
    let json = serde_json::to_value(&root).unwrap();

    assert_eq!(json["path"], "");
    assert_eq!(json["environments"][0]["path"], "dev");
    assert_eq!(json["environments"][1]["stacks"][0]["protect"], true);
}
