//! Unit tests for CLI commands.

use super::*;
use crate::events::BuildEvents;
use crate::ExtractArgs;
use depsnap_extractor::ConfigurationFilter;
use tempfile::TempDir;

const EVENTS: &str = r#"{
  "repositories": [
    {"module": "org.example:a:1.0", "repository": "https://repo.example.org/maven2/"},
    {"module": "org.example:b:2.0", "repository": "internal"}
  ],
  "configurations": [
    {
      "project_path": ":app",
      "configuration_name": "compileClasspath",
      "graph": {
        "components": [
          {"group": "org.example", "module": "a", "version": "1.0", "dependencies": [1]},
          {"group": "org.example", "module": "b", "version": "2.0"}
        ],
        "roots": [0]
      }
    },
    {
      "project_path": ":app",
      "configuration_name": "testCompileClasspath",
      "graph": {
        "components": [
          {"group": "org.example", "module": "b", "version": "2.0"}
        ],
        "roots": [0]
      }
    }
  ]
}"#;

const MALFORMED_EVENTS: &str = r#"{
  "configurations": [
    {
      "configuration_name": "runtimeClasspath",
      "graph": {
        "components": [{"group": "org.example", "module": "broken", "version": ""}],
        "roots": [0]
      }
    }
  ]
}"#;

/// Context isolated from the machine running the tests: no environment
/// overrides, and an empty depsnap.toml in the working directory so that
/// discovery never reaches a parent directory.
fn create_test_context(temp_dir: &TempDir) -> CommandContext {
    let cwd = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    std::fs::write(cwd.join(depsnap_config::CONFIG_FILE_NAME), "").unwrap();
    CommandContext {
        cwd,
        output: crate::output::OutputHandler::plain(),
        env: HashMap::new(),
    }
}

fn extract_args(events: &str) -> ExtractArgs {
    ExtractArgs {
        events: Utf8PathBuf::from(events),
        output: None,
        config: None,
        include_projects: None,
        include_configurations: None,
        report_dir: None,
        compact: false,
    }
}

async fn read_json(path: Utf8PathBuf) -> serde_json::Value {
    let content = tokio::fs::read_to_string(path).await.unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_build_manifest_escalates_across_configurations() {
    let events = BuildEvents::parse(EVENTS, "events").unwrap();
    let manifest = extract::build_manifest(&events, ConfigurationFilter::include_all()).unwrap();

    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.direct_count(), 2);

    let a = manifest.get("pkg:maven/org.example/a@1.0").unwrap();
    assert_eq!(a.repository(), Some("https://repo.example.org/maven2"));
    assert_eq!(a.dependencies.len(), 1);

    let b = manifest.get("pkg:maven/org.example/b@2.0").unwrap();
    assert_eq!(b.repository(), Some("internal"));
    assert!(b.dependencies.is_empty());
}

#[test]
fn test_build_manifest_applies_filter() {
    let events = BuildEvents::parse(EVENTS, "events").unwrap();
    let filter = ConfigurationFilter::new(None, Some("compileClasspath")).unwrap();
    let manifest = extract::build_manifest(&events, filter).unwrap();

    let b = manifest.get("pkg:maven/org.example/b@2.0").unwrap();
    assert!(!b.relationship.is_direct());
}

#[test]
fn test_parse_rejects_invalid_events() {
    let err = BuildEvents::parse("{\"configurations\": 3}", "events.json").unwrap_err();
    assert!(matches!(err, DepsnapError::InputParse { ref what, .. } if what == "events.json"));
}

#[tokio::test]
async fn test_extract_writes_output_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("events.json"), EVENTS).await.unwrap();

    let mut args = extract_args("events.json");
    args.output = Some(Utf8PathBuf::from("out/manifest.json"));
    extract::execute(args, &ctx).await.unwrap();

    let value = read_json(ctx.cwd.join("out/manifest.json")).await;
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["purl"], "pkg:maven/org.example/a@1.0");
    assert_eq!(entries[0]["relationship"], "direct");
    assert_eq!(entries[1]["relationship"], "direct");
    assert_eq!(entries[1]["metadata"]["repository"], "internal");
}

#[tokio::test]
async fn test_extract_uses_report_dir_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("events.json"), EVENTS).await.unwrap();
    tokio::fs::write(
        ctx.cwd.join(depsnap_config::CONFIG_FILE_NAME),
        "[extract]\nreport-dir = \"reports\"\ninclude-configurations = \"test.*\"\n",
    )
    .await
    .unwrap();

    extract::execute(extract_args("events.json"), &ctx).await.unwrap();

    let value = read_json(ctx.cwd.join("reports").join(ExtractorConfig::MANIFEST_FILE_NAME)).await;
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["purl"], "pkg:maven/org.example/b@2.0");
}

#[tokio::test]
async fn test_extract_cli_override_beats_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("events.json"), EVENTS).await.unwrap();
    tokio::fs::write(
        ctx.cwd.join(depsnap_config::CONFIG_FILE_NAME),
        "[extract]\nreport-dir = \"from-file\"\n",
    )
    .await
    .unwrap();

    let mut args = extract_args("events.json");
    args.report_dir = Some(Utf8PathBuf::from("from-cli"));
    extract::execute(args, &ctx).await.unwrap();

    assert!(ctx.cwd.join("from-cli").join(ExtractorConfig::MANIFEST_FILE_NAME).is_file());
    assert!(!ctx.cwd.join("from-file").exists());
}

#[tokio::test]
async fn test_extract_env_override_beats_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("events.json"), EVENTS).await.unwrap();
    tokio::fs::write(
        ctx.cwd.join(depsnap_config::CONFIG_FILE_NAME),
        "[extract]\nreport-dir = \"from-file\"\n",
    )
    .await
    .unwrap();
    ctx.env.insert(depsnap_config::ENV_REPORT_DIR.to_string(), "from-env".to_string());

    extract::execute(extract_args("events.json"), &ctx).await.unwrap();

    assert!(ctx.cwd.join("from-env").join(ExtractorConfig::MANIFEST_FILE_NAME).is_file());
    assert!(!ctx.cwd.join("from-file").exists());
}

#[tokio::test]
async fn test_extract_failure_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("events.json"), MALFORMED_EVENTS).await.unwrap();

    let mut args = extract_args("events.json");
    args.output = Some(Utf8PathBuf::from("manifest.json"));
    let err = extract::execute(args, &ctx).await.unwrap_err();

    assert!(matches!(err, DepsnapError::ExtractionFailed { count: 1, .. }));
    assert!(!ctx.cwd.join("manifest.json").exists());
}

#[tokio::test]
async fn test_extract_missing_events_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);

    let err = extract::execute(extract_args("missing.json"), &ctx).await.unwrap_err();
    assert!(matches!(err, DepsnapError::Io { .. }));
}

#[tokio::test]
async fn test_check_accepts_valid_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(
        ctx.cwd.join(depsnap_config::CONFIG_FILE_NAME),
        "[extract]\ninclude-projects = \":app|:lib\"\n",
    )
    .await
    .unwrap();

    check::execute(None, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_check_rejects_bad_pattern() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(&temp_dir);
    tokio::fs::write(ctx.cwd.join("custom.toml"), "[extract]\ninclude-configurations = \"(\"\n")
        .await
        .unwrap();

    let err = check::execute(Some(Utf8PathBuf::from("custom.toml")), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, DepsnapError::PatternSyntax { .. }));
}
