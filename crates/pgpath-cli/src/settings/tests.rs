//! Tests for settings loading

use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_file_gives_defaults() {
    let settings = PgpathSettings::from_toml("").unwrap();
    assert_eq!(settings, PgpathSettings::default());
    assert_eq!(settings.analysis.plan_extension, "json");
    assert_eq!(settings.analysis.log_pattern, "postgresql-*.log");
    assert!(settings.analysis.include_parameterized);
    assert!(settings.staging.remove_source_logs);
    assert_eq!(settings.logging.filter, "info");
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let settings = PgpathSettings::from_toml(indoc! {r#"
        [analysis]
        log_pattern = "planner-*.txt"

        [staging]
        remove_source_logs = false
    "#})
    .unwrap();

    assert_eq!(settings.analysis.log_pattern, "planner-*.txt");
    assert_eq!(settings.analysis.plan_extension, "json");
    assert!(!settings.staging.remove_source_logs);
    assert!(!settings.logging.json);
}

#[test]
fn test_wrong_type_is_rejected() {
    assert!(PgpathSettings::from_toml("[staging]\nremove_source_logs = \"yes\"\n").is_err());
}

#[test]
fn test_log_matcher() {
    let matcher = PgpathSettings::default().log_matcher().unwrap();
    assert!(matcher.is_match("postgresql-2024-05-01_120000.log"));
    assert!(!matcher.is_match("q1.json"));
}

#[test]
fn test_invalid_log_pattern() {
    let mut settings = PgpathSettings::default();
    settings.analysis.log_pattern = "postgresql-[.log".to_string();
    assert!(settings.log_matcher().is_err());
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[logging]\njson = true\n").unwrap();

    let settings = PgpathSettings::load(Some(path.as_path())).unwrap();
    assert!(settings.logging.json);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(PgpathSettings::load(Some(dir.path().join("absent.toml").as_path())).is_err());
}
