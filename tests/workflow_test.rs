use std::path::PathBuf;

use version_labeler::cli::run_label_workflow;
use version_labeler::config::Settings;
use version_labeler::context::{RepoRef, RunContext};
use version_labeler::github::MockPullRequestApi;
use version_labeler::{ChangedFilesPattern, LabelerError};

fn settings(changed_files: Option<&str>, label_format: Option<&str>) -> Settings {
    Settings {
        properties_path: PathBuf::from("tests/fixtures/gradle.properties"),
        repo_token: "token".to_string(),
        changed_files: changed_files.and_then(|p| ChangedFilesPattern::parse(p).unwrap()),
        label_format: label_format.map(str::to_string),
        version_key: "VERSION_NAME".to_string(),
        api_url: "https://api.github.com".to_string(),
        dry_run: false,
    }
}

fn context() -> RunContext {
    RunContext {
        repo: RepoRef::parse("octo/widgets").unwrap(),
        pr_number: 17,
    }
}

#[test]
fn test_labels_without_filter() {
    let api = MockPullRequestApi::new();
    let result = run_label_workflow(&settings(None, None), &context(), &api).unwrap();

    assert_eq!(result.version, "1.4.0");
    assert_eq!(result.label, "1.4.0");
    assert!(result.applied);
    assert_eq!(result.skipped_reason, None);

    // no pattern, so changed files are never listed
    assert_eq!(api.list_calls(), 0);

    let applied = api.applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].repo.to_string(), "octo/widgets");
    assert_eq!(applied[0].issue_number, 17);
    assert_eq!(applied[0].labels, vec!["1.4.0"]);
}

#[test]
fn test_labels_with_format() {
    let api = MockPullRequestApi::new();
    let result =
        run_label_workflow(&settings(None, Some("v{version}-release")), &context(), &api).unwrap();

    assert_eq!(result.label, "v1.4.0-release");
    assert_eq!(api.applied()[0].labels, vec!["v1.4.0-release"]);
}

#[test]
fn test_labels_when_changed_file_matches() {
    let api = MockPullRequestApi::new().with_changed_files(["src/a.txt", "docs/readme.md"]);
    let result = run_label_workflow(&settings(Some("src/**"), None), &context(), &api).unwrap();

    assert!(result.applied);
    assert_eq!(api.list_calls(), 1);
    assert_eq!(api.applied().len(), 1);
}

#[test]
fn test_skips_when_no_changed_file_matches() {
    let api = MockPullRequestApi::new().with_changed_files(["src/a.txt"]);
    let result = run_label_workflow(&settings(Some("docs/**"), None), &context(), &api).unwrap();

    assert!(!result.applied);
    assert_eq!(result.label, "1.4.0");
    assert!(result.skipped_reason.unwrap().contains("docs/**"));
    assert!(api.applied().is_empty());
}

#[test]
fn test_skips_when_pull_request_changes_nothing() {
    let api = MockPullRequestApi::new();
    let result = run_label_workflow(&settings(Some("**"), None), &context(), &api).unwrap();

    assert!(!result.applied);
    assert!(api.applied().is_empty());
}

#[test]
fn test_dry_run_does_not_label() {
    let api = MockPullRequestApi::new().with_changed_files(["src/a.txt"]);
    let mut settings = settings(Some("src/**"), Some("v{version}"));
    settings.dry_run = true;

    let result = run_label_workflow(&settings, &context(), &api).unwrap();
    assert!(!result.applied);
    assert_eq!(result.label, "v1.4.0");
    assert_eq!(result.skipped_reason.as_deref(), Some("dry run"));
    assert_eq!(api.list_calls(), 1);
    assert!(api.applied().is_empty());
}

#[test]
fn test_missing_properties_file_fails_before_remote_calls() {
    let api = MockPullRequestApi::new().with_changed_files(["src/a.txt"]);
    let mut settings = settings(Some("src/**"), None);
    settings.properties_path = PathBuf::from("tests/fixtures/missing.properties");

    let err = run_label_workflow(&settings, &context(), &api).unwrap_err();
    assert!(matches!(err, LabelerError::Config(_)));
    assert_eq!(api.list_calls(), 0);
    assert!(api.applied().is_empty());
}

#[test]
fn test_missing_version_key_fails() {
    let api = MockPullRequestApi::new();
    let mut settings = settings(None, None);
    settings.version_key = "NOT_THERE".to_string();

    let err = run_label_workflow(&settings, &context(), &api).unwrap_err();
    assert!(err.to_string().contains("NOT_THERE"));
    assert!(api.applied().is_empty());
}

#[test]
fn test_listing_failure_is_fatal() {
    let api = MockPullRequestApi::new().failing_listing("API rate limit exceeded");
    let err = run_label_workflow(&settings(Some("src/**"), None), &context(), &api).unwrap_err();

    assert!(matches!(err, LabelerError::Remote(_)));
    assert!(api.applied().is_empty());
}

#[test]
fn test_labeling_failure_is_fatal() {
    let api = MockPullRequestApi::new().failing_labeling("Resource not accessible by integration");
    let err = run_label_workflow(&settings(None, None), &context(), &api).unwrap_err();

    assert!(err.to_string().contains("Resource not accessible"));
}

#[test]
fn test_custom_version_key() {
    let api = MockPullRequestApi::new();
    let mut settings = settings(None, Some("build-{version}"));
    settings.version_key = "VERSION_CODE".to_string();

    let result = run_label_workflow(&settings, &context(), &api).unwrap();
    assert_eq!(result.label, "build-140");
}
