use crate::graph::{build, materialize, DefaultEnvironment, Dependency, Environment, GraphBuilder, Label, ResolvedIdentity};
use crate::tests::common::{group, lockfile_of, roots};
use std::collections::BTreeSet;

fn find<'a>(deps: &'a [Dependency], name: &str) -> &'a Dependency {
    deps.iter().find(|d| d.name == name).unwrap_or_else(|| panic!("missing {name}"))
}

/// prod -> shared -> leaf, dev -> shared, orphan on its own.
fn fixture() -> crate::graph::DependencyGraph {
    let lock = lockfile_of(vec![
        group(&["prod@^1.0.0"], "1.0.0", &["shared@^1.0.0"]),
        group(&["dev@^1.0.0"], "1.0.0", &["shared@^1.0.0"]),
        group(&["shared@^1.0.0"], "1.1.0", &["leaf@^1.0.0"]),
        group(&["leaf@^1.0.0"], "1.0.2", &[]),
        group(&["orphan@^1.0.0"], "1.0.0", &[]),
    ]);
    build(&lock, &roots(&["prod@^1.0.0"], &["dev@^1.0.0"]), "yarn.lock").graph
}

#[test]
fn default_policy_leaves_transitives_empty() {
    let deps = materialize(&fixture(), DefaultEnvironment::default());
    assert!(find(&deps, "shared").environments.is_empty());
    assert!(find(&deps, "orphan").environments.is_empty());
    assert_eq!(find(&deps, "prod").environments, BTreeSet::from([Environment::Production]));
}

#[test]
fn production_policy_fills_every_empty_set() {
    let deps = materialize(&fixture(), DefaultEnvironment::Production);
    for name in ["shared", "leaf", "orphan"] {
        assert_eq!(find(&deps, name).environments, BTreeSet::from([Environment::Production]), "{name}");
    }
    assert_eq!(find(&deps, "dev").environments, BTreeSet::from([Environment::Development]));
}

#[test]
fn development_policy_fills_every_empty_set() {
    let deps = materialize(&fixture(), DefaultEnvironment::Development);
    assert_eq!(find(&deps, "orphan").environments, BTreeSet::from([Environment::Development]));
    assert_eq!(find(&deps, "prod").environments, BTreeSet::from([Environment::Production]));
}

#[test]
fn inherit_policy_follows_reachability() {
    let deps = materialize(&fixture(), DefaultEnvironment::Inherit);
    let both = BTreeSet::from([Environment::Production, Environment::Development]);
    assert_eq!(find(&deps, "shared").environments, both);
    assert_eq!(find(&deps, "leaf").environments, both);
    assert!(find(&deps, "orphan").environments.is_empty());
    assert_eq!(find(&deps, "dev").environments, BTreeSet::from([Environment::Development]));
}

#[test]
fn inherit_policy_terminates_on_cycles() {
    let lock = lockfile_of(vec![
        group(&["a@^1.0.0"], "1.0.0", &["b@^1.0.0"]),
        group(&["b@^1.0.0"], "1.0.0", &["a@^1.0.0"]),
    ]);
    let graph = build(&lock, &roots(&["a@^1.0.0"], &[]), "yarn.lock").graph;
    let deps = materialize(&graph, DefaultEnvironment::Inherit);
    assert_eq!(find(&deps, "b").environments, BTreeSet::from([Environment::Production]));
}

#[test]
fn locations_are_collected_in_sorted_order() {
    let node = ResolvedIdentity::new("multi", "1.0.0");
    let mut builder = GraphBuilder::new();
    builder.add_label(&node, Label::Location("https://b.example/multi.tgz".into()));
    builder.add_label(&node, Label::Location("https://a.example/multi.tgz".into()));
    let deps = materialize(&builder.finish(), DefaultEnvironment::None);
    assert_eq!(
        deps[0].locations,
        vec!["https://a.example/multi.tgz".to_string(), "https://b.example/multi.tgz".to_string()]
    );
    assert!(!deps[0].direct);
}

#[test]
fn dependency_serializes_with_backend_field_names() {
    let dep = Dependency {
        name: "a".into(),
        version: "1.0.0".into(),
        locations: vec!["https://x/a.tgz".into()],
        environments: BTreeSet::from([Environment::Development, Environment::Production]),
        direct: true,
    };
    let value = serde_json::to_value(&dep).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "a",
            "version": "1.0.0",
            "locations": ["https://x/a.tgz"],
            "environments": ["production", "development"],
            "direct": true
        })
    );
}

#[test]
fn default_environment_parses_from_cli_text() {
    assert_eq!("inherit".parse::<DefaultEnvironment>(), Ok(DefaultEnvironment::Inherit));
    assert_eq!("PROD".parse::<DefaultEnvironment>(), Ok(DefaultEnvironment::Production));
    assert!("both".parse::<DefaultEnvironment>().is_err());
}
