#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::fs;

fn write(dir: &std::path::Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn missing_files_resolve_to_empty_config() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    let resolved = load(&paths).unwrap();
    assert!(resolved.hooks.is_empty());
    assert!(resolved.logging.is_none());
}

#[test]
fn local_hook_with_same_name_overrides_project_hook() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    write(
        project.path(),
        ".claude/settings.json",
        r#"{"hooks":[{"name":"lint","command":["a"],"events":["Stop"],"output_format":"structured","priority":10}]}"#,
    );
    write(
        project.path(),
        ".claude/settings.local.json",
        r#"{"hooks":[{"name":"lint","command":["b"],"events":["Stop"],"output_format":"structured","priority":20}]}"#,
    );

    let resolved = load(&paths).unwrap();
    assert_eq!(resolved.hooks.len(), 1);
    assert_eq!(resolved.hooks[0].command, vec!["b".to_string()]);
    assert_eq!(resolved.hooks[0].priority(), 20);
}

#[test]
fn distinct_names_across_layers_are_both_kept() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    write(
        home.path(),
        ".claude/settings.json",
        r#"{"hooks":[{"name":"global-hook","command":["a"],"events":["Stop"],"output_format":"structured"}]}"#,
    );
    write(
        project.path(),
        ".claude/settings.json",
        r#"{"hooks":[{"name":"project-hook","command":["b"],"events":["Stop"],"output_format":"structured"}]}"#,
    );

    let resolved = load(&paths).unwrap();
    let names: Vec<&str> = resolved.hooks.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["global-hook", "project-hook"]);
}

#[test]
fn an_invalid_file_is_rejected_in_full_not_skipped() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    write(
        project.path(),
        ".claude/settings.json",
        r#"{"hooks":[{"name":"","command":["a"],"events":["Stop"],"output_format":"structured"}]}"#,
    );

    let err = load(&paths).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn malformed_json_is_a_fatal_parse_error() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    write(project.path(), ".claude/settings.json", "{not json");

    let err = load(&paths).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
}

#[test]
fn later_layer_logging_config_overrides_earlier() {
    let home = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    let paths = SettingsPaths::resolve(home.path(), project.path());

    write(
        home.path(),
        ".claude/settings.json",
        r#"{"logging":{"level":"off"}}"#,
    );
    write(
        project.path(),
        ".claude/settings.json",
        r#"{"logging":{"level":"verbose"}}"#,
    );

    let resolved = load(&paths).unwrap();
    assert_eq!(
        resolved.logging.unwrap().level,
        super::super::model::LogLevel::Verbose
    );
}
