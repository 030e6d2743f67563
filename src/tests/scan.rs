use crate::config::Config;
use crate::error::Error;
use crate::graph::{DefaultEnvironment, Environment};
use crate::manifest;
use crate::package::PackageKey;
use crate::report::{self, OutputFormat};
use crate::scan::{self, Project};
use crate::tests::common::{write_file, SCENARIO_LOCK};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tempfile::tempdir;

const MANIFEST: &str = r#"{
  "name": "scenario-app",
  "version": "0.1.0",
  "dependencies": { "a": "^1.0.0" },
  "devDependencies": { "jest": "^29.0.0" }
}"#;

const BERRY_LOCK: &str = r#"__metadata:
  version: 6
  cacheKey: 8

"app@workspace:.":
  version: 0.0.0-use.local
  resolution: "app@workspace:."
  dependencies:
    lodash: ^4.17.21
    typescript: 5.4.5
  languageName: unknown
  linkType: soft

"lodash@npm:^4.17.21":
  version: 4.17.21
  resolution: "lodash@npm:4.17.21"
  checksum: 6b4f5a
  languageName: node
  linkType: hard

"typescript@npm:5.4.5":
  version: 5.4.5
  resolution: "typescript@npm:5.4.5"
  languageName: node
  linkType: hard
"#;

#[test]
fn manifest_root_sets_split_by_section() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("package.json"),
        r#"{ "dependencies": { "a": "^1" }, "optionalDependencies": { "o": "^2" }, "devDependencies": { "d": "^3" } }"#,
    );
    let roots = manifest::load_root_sets(dir.path()).unwrap();
    assert_eq!(
        roots.production,
        BTreeSet::from([PackageKey::parse("a@^1"), PackageKey::parse("o@^2")])
    );
    assert_eq!(roots.development, BTreeSet::from([PackageKey::parse("d@^3")]));
}

#[test]
fn missing_manifest_means_empty_roots() {
    let dir = tempdir().unwrap();
    assert!(manifest::load_root_sets(dir.path()).unwrap().is_empty());
}

#[test]
fn malformed_manifest_is_fatal() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("package.json"), "{ not json");
    let err = manifest::load_root_sets(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Manifest { .. }));
}

#[test]
fn analyze_project_end_to_end() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("package.json"), MANIFEST);
    write_file(&dir.path().join("yarn.lock"), SCENARIO_LOCK);

    let report = scan::analyze(&Project::in_dir(dir.path()), &Config::default()).unwrap();
    assert_eq!(report.dependencies.len(), 2);
    assert_eq!(report.direct_count(), 1);
    assert_eq!(report.edges.len(), 1);
    assert!(report.warnings.is_empty());
    assert_eq!(report.source.sha256.len(), 64);

    let json: Value = serde_json::from_str(&report::render(&[report], OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["source"]["kind"], "yarn-v1");
    assert_eq!(json["edges"][0], json!({ "from": "a@1.0.0", "to": "b@2.0.0" }));
    assert_eq!(json["dependencies"][0]["environments"], json!(["production"]));
    assert_eq!(json["dependencies"][1]["direct"], json!(false));
}

#[test]
fn analyze_honours_default_environment() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("package.json"), MANIFEST);
    write_file(&dir.path().join("yarn.lock"), SCENARIO_LOCK);
    let config = Config { default_environment: DefaultEnvironment::Inherit, ..Config::default() };
    let report = scan::analyze(&Project::in_dir(dir.path()), &config).unwrap();
    let b = report.dependencies.iter().find(|d| d.name == "b").unwrap();
    assert_eq!(b.environments, BTreeSet::from([Environment::Production]));
}

#[test]
fn parse_failure_names_the_file() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("yarn.lock"), "a@^1.0.0:\n  dependencies:\n    b \"^2\n");
    let err = scan::analyze(&Project::in_dir(dir.path()), &Config::default()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("yarn.lock"), "{text}");
    assert!(text.contains("line 3"), "{text}");
}

#[test]
fn recursive_discovery_skips_configured_dirs() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("yarn.lock"), SCENARIO_LOCK);
    write_file(&root.join("apps/web/yarn.lock"), SCENARIO_LOCK);
    write_file(&root.join("node_modules/dep/yarn.lock"), SCENARIO_LOCK);

    let projects = scan::discover(root, true, &Config::default()).unwrap();
    let found: Vec<_> = projects.iter().map(|p| p.lockfile.strip_prefix(root).unwrap().to_path_buf()).collect();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&std::path::PathBuf::from("yarn.lock")));
    assert!(found.contains(&std::path::PathBuf::from("apps/web/yarn.lock")));
    assert_eq!(projects.iter().find(|p| p.lockfile.ends_with("apps/web/yarn.lock")).unwrap().root, root.join("apps/web"));
}

#[test]
fn analyze_all_isolates_failures() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("good/yarn.lock"), SCENARIO_LOCK);
    write_file(&dir.path().join("bad/yarn.lock"), "oops\n");
    let projects = vec![Project::in_dir(&dir.path().join("bad")), Project::in_dir(&dir.path().join("good"))];
    let results = scan::analyze_all(&projects, &Config::default());
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0].result, Err(Error::Parse { .. })));
    assert_eq!(results[1].result.as_ref().unwrap().dependencies.len(), 2);
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("lockgraph.yml"),
        "default-environment: production\nfail-on-warnings: true\n",
    );
    let config = Config::discover(dir.path(), None).unwrap();
    assert_eq!(config.default_environment, DefaultEnvironment::Production);
    assert!(config.fail_on_warnings);
    assert_eq!(config.skip_dirs, Config::default().skip_dirs);
}

#[test]
fn unknown_config_keys_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.yml");
    write_file(&path, "default-env: production\n");
    assert!(matches!(Config::discover(dir.path(), Some(&path)), Err(Error::Config { .. })));
}

#[test]
fn yaml_and_text_reports_render() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("package.json"), MANIFEST);
    write_file(&dir.path().join("yarn.lock"), SCENARIO_LOCK);
    let report = scan::analyze(&Project::in_dir(dir.path()), &Config::default()).unwrap();

    let yaml = report::render(std::slice::from_ref(&report), OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("name: a"), "{yaml}");
    let text = report::render(&[report], OutputFormat::Text).unwrap();
    assert!(text.contains("a@1.0.0 [direct] production"), "{text}");
    assert!(text.contains("b@2.0.0 [deep]"), "{text}");
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn berry_manifest_ranges_match_protocol_aliases() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("package.json"),
        r#"{ "dependencies": { "lodash": "^4.17.21" }, "devDependencies": { "typescript": "5.4.5" } }"#,
    );
    write_file(&dir.path().join("yarn.lock"), BERRY_LOCK);

    let report = scan::analyze(&Project::in_dir(dir.path()), &Config::default()).unwrap();
    assert_eq!(report.source.kind, crate::lockfile::LockfileKind::YarnBerry);
    assert_eq!(report.direct_count(), 2);
    let lodash = report.dependencies.iter().find(|d| d.name == "lodash").unwrap();
    assert!(lodash.direct);
    assert_eq!(lodash.environments, BTreeSet::from([Environment::Production]));
    let typescript = report.dependencies.iter().find(|d| d.name == "typescript").unwrap();
    assert_eq!(typescript.environments, BTreeSet::from([Environment::Development]));
}

#[test]
fn root_sets_gain_berry_descriptors() {
    let roots = manifest::RootSets {
        production: BTreeSet::from([PackageKey::parse("lodash@^4.17.21"), PackageKey::parse("pad@npm:left-pad@^1")]),
        development: BTreeSet::new(),
    };
    let berry = roots.clone().normalized_for(crate::lockfile::LockfileKind::YarnBerry);
    assert!(berry.production.contains(&PackageKey::parse("lodash@npm:^4.17.21")));
    assert!(berry.production.contains(&PackageKey::parse("lodash@^4.17.21")));
    assert!(berry.production.contains(&PackageKey::parse("pad@npm:left-pad@^1")));
    assert_eq!(berry.production.len(), 3);
    assert_eq!(roots.clone().normalized_for(crate::lockfile::LockfileKind::YarnV1), roots);
}
